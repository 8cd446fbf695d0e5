//! Swept tube primitive

use crate::curve::ParametricCurve;
use phantomas_core::{Error, Result, TriangleMesh};
use std::f32::consts::PI;

const MIN_AXIAL_SEGMENTS: usize = 1;
const MIN_RADIAL_SEGMENTS: usize = 3;

/// A circle of `radius` swept along a curve.
///
/// Ring `i` is centered on `curve.point(i / axial_segments)`, so ring
/// centers follow the curve's own parametrization rather than arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeGeometry {
    axial_segments: usize,
    radial_segments: usize,
    radius: f32,
}

impl TubeGeometry {
    pub fn new(axial_segments: usize, radius: f32, radial_segments: usize) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::invalid_source(format!(
                "tube radius must be finite and non-negative, got {}",
                radius
            )));
        }
        Ok(Self {
            axial_segments: axial_segments.max(MIN_AXIAL_SEGMENTS),
            radial_segments: radial_segments.max(MIN_RADIAL_SEGMENTS),
            radius,
        })
    }

    pub fn axial_segments(&self) -> usize {
        self.axial_segments
    }

    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn vertex_count(&self) -> usize {
        (self.axial_segments + 1) * (self.radial_segments + 1)
    }

    pub fn face_count(&self) -> usize {
        2 * self.axial_segments * self.radial_segments
    }

    /// Sweep the tube along `curve`
    pub fn build<C: ParametricCurve + ?Sized>(&self, curve: &C) -> TriangleMesh {
        let (axial, radial) = (self.axial_segments, self.radial_segments);
        let frames = curve.frenet_frames(axial);
        let mut mesh = TriangleMesh::with_capacity(self.vertex_count(), self.face_count());
        let mut normals = Vec::with_capacity(self.vertex_count());

        for i in 0..=axial {
            let center = curve.point(i as f32 / axial as f32);
            let (n, b) = (frames.normals[i], frames.binormals[i]);

            for j in 0..=radial {
                let v = 2.0 * PI * j as f32 / radial as f32;
                let (sin, cos) = (v.sin(), -v.cos());
                let normal = (n * cos + b * sin).normalize();
                mesh.add_vertex(center + normal * self.radius);
                normals.push(normal);
            }
        }

        let stride = radial + 1;
        for j in 1..=axial {
            for i in 1..=radial {
                let a = stride * (j - 1) + (i - 1);
                let b = stride * j + (i - 1);
                let c = stride * j + i;
                let d = stride * (j - 1) + i;

                mesh.add_face([a, b, d]);
                mesh.add_face([b, c, d]);
            }
        }

        mesh.set_normals(normals);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use phantomas_core::Point3f;

    struct Arc;

    impl ParametricCurve for Arc {
        fn point(&self, t: f32) -> Point3f {
            let a = t * PI;
            Point3f::new(a.cos() * 5.0, a.sin() * 5.0, 0.0)
        }
    }

    #[test]
    fn test_tube_counts() {
        let tube = TubeGeometry::new(16, 0.5, 8).unwrap();
        let mesh = tube.build(&Arc);
        assert_eq!(mesh.vertex_count(), 17 * 9);
        assert_eq!(mesh.face_count(), 2 * 16 * 8);
        assert!(mesh.faces.iter().flatten().all(|&i| i < mesh.vertex_count()));
    }

    #[test]
    fn test_rings_sit_at_radius_from_curve() {
        let tube = TubeGeometry::new(12, 0.75, 10).unwrap();
        let mesh = tube.build(&Arc);
        for i in 0..=12 {
            let center = Arc.point(i as f32 / 12.0);
            for j in 0..=10 {
                let v = mesh.vertices[i * 11 + j];
                assert_relative_eq!((v - center).norm(), 0.75, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_zero_radius_collapses_onto_curve() {
        let mesh = TubeGeometry::new(4, 0.0, 3).unwrap().build(&Arc);
        assert_relative_eq!(mesh.vertices[0], Arc.point(0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_negative_radius() {
        assert!(TubeGeometry::new(8, -0.1, 8).is_err());
        let clamped = TubeGeometry::new(0, 1.0, 1).unwrap();
        assert_eq!((clamped.axial_segments(), clamped.radial_segments()), (1, 3));
    }
}
