//! UV sphere primitive

use phantomas_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use std::f32::consts::PI;

/// Minimum longitudinal segments for a closed surface
const MIN_WIDTH_SEGMENTS: usize = 3;

/// Minimum latitudinal bands
const MIN_HEIGHT_SEGMENTS: usize = 2;

/// Latitude/longitude sphere centered at the origin.
///
/// The grid has `(width + 1) * (height + 1)` vertices (the seam and the
/// poles are duplicated so each vertex keeps its own normal) and
/// `2 * width * (height - 1)` triangles, since the pole bands are fans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    radius: f32,
    width_segments: usize,
    height_segments: usize,
}

impl SphereGeometry {
    /// Segment counts below the minimum are raised to it
    pub fn new(radius: f32, width_segments: usize, height_segments: usize) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::invalid_source(format!(
                "sphere radius must be finite and non-negative, got {}",
                radius
            )));
        }
        Ok(Self {
            radius,
            width_segments: width_segments.max(MIN_WIDTH_SEGMENTS),
            height_segments: height_segments.max(MIN_HEIGHT_SEGMENTS),
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn width_segments(&self) -> usize {
        self.width_segments
    }

    pub fn height_segments(&self) -> usize {
        self.height_segments
    }

    pub fn vertex_count(&self) -> usize {
        (self.width_segments + 1) * (self.height_segments + 1)
    }

    pub fn face_count(&self) -> usize {
        2 * self.width_segments * (self.height_segments - 1)
    }

    /// Tessellate into a mesh with per-vertex normals
    pub fn to_mesh(&self) -> TriangleMesh {
        let (w, h) = (self.width_segments, self.height_segments);
        let mut mesh = TriangleMesh::with_capacity(self.vertex_count(), self.face_count());
        let mut normals = Vec::with_capacity(self.vertex_count());

        for iy in 0..=h {
            let theta = PI * iy as f32 / h as f32;
            for ix in 0..=w {
                let phi = 2.0 * PI * ix as f32 / w as f32;
                let direction = Vector3f::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                mesh.add_vertex(Point3f::from(direction * self.radius));
                normals.push(direction);
            }
        }

        let index = |ix: usize, iy: usize| iy * (w + 1) + ix;
        for iy in 0..h {
            for ix in 0..w {
                let a = index(ix + 1, iy);
                let b = index(ix, iy);
                let c = index(ix, iy + 1);
                let d = index(ix + 1, iy + 1);

                if iy != 0 {
                    mesh.add_face([a, b, d]);
                }
                if iy != h - 1 {
                    mesh.add_face([b, c, d]);
                }
            }
        }

        mesh.set_normals(normals);
        mesh
    }
}
