//! Skeleton representation: sampled path plus control point markers

use crate::config::{SegmentPolicy, SkeletonConfig, MAX_LINE_SEGMENTS};
use crate::source::{validate_fiber, validate_length, FiberSource};
use crate::sphere::SphereGeometry;
use phantomas_core::{
    Color, Error, LineObject, Material, MeshObject, Polyline, Result, Transform3D, TriangleMesh,
};
use tracing::{debug, trace};

/// Path polyline and merged control point spheres for one fiber.
///
/// `segments` is derived once from the fiber length; whether `refresh`
/// keeps it is governed by [`SkeletonConfig::segment_policy`].
#[derive(Debug, Clone)]
pub struct FiberSkeleton {
    /// Sampled fiber path; ready to hand to a scene
    pub line: LineObject,
    /// One sphere per control point, merged into a single mesh
    pub spheres: MeshObject,
    color: Color,
    segments: usize,
    config: SkeletonConfig,
}

impl FiberSkeleton {
    pub fn build<F: FiberSource + ?Sized>(
        fiber: &F,
        config: &SkeletonConfig,
        color: Color,
    ) -> Result<Self> {
        validate_fiber(fiber)?;
        let segments = segment_count(fiber.length(), config)?;

        let line = LineObject::new(sample_path(fiber, segments), Material::line_basic(color));
        let spheres = MeshObject::new(
            control_point_markers(fiber, config)?,
            Material::mesh_basic(config.marker_color),
        );

        debug!(
            segments,
            control_points = fiber.control_points().len(),
            "built fiber skeleton"
        );

        Ok(Self {
            line,
            spheres,
            color,
            segments,
            config: *config,
        })
    }

    /// Resample the path and the markers from the fiber's current state.
    /// On error the skeleton is left as it was.
    pub fn refresh<F: FiberSource + ?Sized>(&mut self, fiber: &F) -> Result<()> {
        let update = self.prepare(fiber)?;
        self.apply(update);
        Ok(())
    }

    /// Compute refreshed buffers without touching the current ones
    pub(crate) fn prepare<F: FiberSource + ?Sized>(&self, fiber: &F) -> Result<SkeletonUpdate> {
        validate_fiber(fiber)?;

        let segments = match self.config.segment_policy {
            SegmentPolicy::Fixed => self.segments,
            SegmentPolicy::Recompute => segment_count(fiber.length(), &self.config)?,
        };
        Ok(SkeletonUpdate {
            segments,
            markers: control_point_markers(fiber, &self.config)?,
            path: sample_path(fiber, segments),
        })
    }

    pub(crate) fn apply(&mut self, update: SkeletonUpdate) {
        if update.segments != self.segments {
            debug!(from = self.segments, to = update.segments, "skeleton segment count changed");
            self.segments = update.segments;
        }
        self.spheres.replace_geometry(update.markers);
        self.line.replace_geometry(update.path);

        trace!(segments = self.segments, revision = self.line.revision, "refreshed fiber skeleton");
    }

    /// Path segments currently used for sampling
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }
}

/// Buffers computed by [`FiberSkeleton::prepare`], swapped in by `apply`
#[derive(Debug)]
pub(crate) struct SkeletonUpdate {
    segments: usize,
    markers: TriangleMesh,
    path: Polyline,
}

/// `floor(length * length_factor)`, at least 1 and at most the configured cap.
///
/// Counts above [`MAX_LINE_SEGMENTS`] are rejected rather than allocated.
pub fn segment_count(length: f32, config: &SkeletonConfig) -> Result<usize> {
    validate_length(length)?;
    let raw = (length as f64 * config.length_factor as f64).floor().max(1.0);
    let segments = match config.max_line_segments {
        Some(cap) => raw.min(cap.max(1) as f64),
        None => raw,
    };
    if segments > MAX_LINE_SEGMENTS as f64 {
        return Err(Error::invalid_source(format!(
            "fiber length {} needs {} path segments, more than the limit of {}",
            length, segments, MAX_LINE_SEGMENTS
        )));
    }
    Ok(segments as usize)
}

/// `segments + 1` samples of `fiber.interpolate(i / segments)`
pub fn sample_path<F: FiberSource + ?Sized>(fiber: &F, segments: usize) -> Polyline {
    let segments = segments.max(1);
    Polyline::from_points(
        (0..=segments)
            .map(|i| fiber.interpolate(i as f32 / segments as f32).position)
            .collect(),
    )
}

/// One sphere of the fiber radius at every control point, merged.
/// No control points give an empty mesh.
pub fn control_point_markers<F: FiberSource + ?Sized>(
    fiber: &F,
    config: &SkeletonConfig,
) -> Result<TriangleMesh> {
    let radius = fiber.radius().unwrap_or(config.default_marker_radius);
    let sphere = SphereGeometry::new(radius, config.marker_segments, config.marker_segments)?;
    let template = sphere.to_mesh();

    let points = fiber.control_points();
    let mut merged = TriangleMesh::with_capacity(
        template.vertex_count() * points.len(),
        template.face_count() * points.len(),
    );
    for point in points {
        merged.merge(&template, &Transform3D::to_point(point));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FiberSample, ParametricFiber};
    use approx::assert_relative_eq;
    use phantomas_core::{bounds_of, Error, Point3f};

    fn straight_fiber(length: f32) -> ParametricFiber<impl Fn(f32) -> FiberSample> {
        ParametricFiber::new(
            vec![Point3f::origin(), Point3f::new(length, 0.0, 0.0)],
            Some(0.5),
            length,
            move |t| FiberSample::at(Point3f::new(t * length, 0.0, 0.0)),
        )
    }

    #[test]
    fn test_segment_count_rules() {
        let config = SkeletonConfig::default();
        assert_eq!(segment_count(2.0, &config).unwrap(), 3);
        assert_eq!(segment_count(10.0, &config).unwrap(), 15);
        assert_eq!(segment_count(0.3, &config).unwrap(), 1);
        assert!(matches!(segment_count(0.0, &config), Err(Error::InvalidSource(_))));

        let capped = SkeletonConfig {
            max_line_segments: Some(4),
            ..config
        };
        assert_eq!(segment_count(10.0, &capped).unwrap(), 4);
    }

    #[test]
    fn test_markers_one_sphere_per_control_point() {
        let config = SkeletonConfig {
            marker_segments: 8,
            ..SkeletonConfig::default()
        };
        let fiber = straight_fiber(4.0);
        let mesh = control_point_markers(&fiber, &config).unwrap();
        let single = SphereGeometry::new(0.5, 8, 8).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * single.vertex_count());
        assert_eq!(mesh.face_count(), 2 * single.face_count());
    }

    #[test]
    fn test_markers_centered_on_control_points() {
        let fiber = straight_fiber(4.0);
        let mesh = control_point_markers(&fiber, &SkeletonConfig::default()).unwrap();
        let half = mesh.vertex_count() / 2;
        let (min, max) = bounds_of(&mesh.vertices[half..]);
        assert_relative_eq!(nalgebra::center(&min, &max), Point3f::new(4.0, 0.0, 0.0), epsilon = 1e-4);
        assert_relative_eq!(max.x - min.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_marker_radius_falls_back() {
        let mut fiber = straight_fiber(1.0);
        fiber.radius = None;
        let config = SkeletonConfig {
            marker_segments: 6,
            default_marker_radius: 0.25,
            ..SkeletonConfig::default()
        };
        let mesh = control_point_markers(&fiber, &config).unwrap();
        assert_relative_eq!(mesh.vertices[0].coords.norm(), 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_refresh_keeps_color_and_bumps_revision() {
        let fiber = straight_fiber(2.0);
        let mut skeleton =
            FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::from_hex(0x1533AD)).unwrap();
        skeleton.refresh(&fiber).unwrap();
        assert_eq!(skeleton.color(), Color::from_hex(0x1533AD));
        assert_eq!(skeleton.line.material.color, Color::from_hex(0x1533AD));
        assert_eq!(skeleton.spheres.material.color, Color::YELLOW);
        assert_eq!(skeleton.line.revision, 1);
        assert_eq!(skeleton.spheres.revision, 1);
    }

    #[test]
    fn test_oversized_length_rejected_not_allocated() {
        let config = SkeletonConfig::default();
        assert!(matches!(segment_count(1.0e30, &config), Err(Error::InvalidSource(_))));
        assert!(matches!(segment_count(f32::MAX, &config), Err(Error::InvalidSource(_))));
        assert_eq!(segment_count(699_051.0, &config).unwrap(), MAX_LINE_SEGMENTS);
        assert!(segment_count(699_052.0, &config).is_err());

        let capped = SkeletonConfig {
            max_line_segments: Some(64),
            ..config
        };
        assert_eq!(segment_count(1.0e30, &capped).unwrap(), 64);

        let fiber = straight_fiber(1.0e30);
        assert!(matches!(
            FiberSkeleton::build(&fiber, &config, Color::WHITE),
            Err(Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_failed_refresh_leaves_skeleton_untouched() {
        let config = SkeletonConfig {
            segment_policy: SegmentPolicy::Recompute,
            marker_segments: 6,
            ..SkeletonConfig::default()
        };
        let mut fiber = straight_fiber(2.0);
        let mut skeleton = FiberSkeleton::build(&fiber, &config, Color::WHITE).unwrap();
        let path = skeleton.line.geometry.clone();
        let markers = skeleton.spheres.geometry.clone();

        fiber.length = 0.0;
        assert!(matches!(skeleton.refresh(&fiber), Err(Error::InvalidSource(_))));
        assert_eq!(skeleton.segments(), 3);
        assert_eq!(skeleton.line.revision, 0);
        assert_eq!(skeleton.spheres.revision, 0);
        assert_eq!(skeleton.line.geometry, path);
        assert_eq!(skeleton.spheres.geometry, markers);
    }
}
