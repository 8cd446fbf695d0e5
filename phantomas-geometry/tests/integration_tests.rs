//! Integration tests for phantomas-geometry
//!
//! These cover the discretization and refresh contract of the three
//! builders against hand-written fiber and region sources.

use approx::assert_relative_eq;
use phantomas_core::{Color, Drawable, Point3f, Vector3f};
use phantomas_geometry::*;

/// Fiber whose every geometry-affecting field can be changed between frames
struct MutableFiber {
    control_points: Vec<Point3f>,
    radius: Option<f32>,
    length: f32,
    scale: f32,
}

impl MutableFiber {
    /// `control_points = [[0,0,0],[1,0,0]]`, `length = 2`, `radius = 0.5`,
    /// `interpolate(t) = [2t, 0, 0]`
    fn reference() -> Self {
        Self {
            control_points: vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)],
            radius: Some(0.5),
            length: 2.0,
            scale: 2.0,
        }
    }
}

impl FiberSource for MutableFiber {
    fn control_points(&self) -> &[Point3f] {
        &self.control_points
    }

    fn radius(&self) -> Option<f32> {
        self.radius
    }

    fn length(&self) -> f32 {
        self.length
    }

    fn interpolate(&self, t: f32) -> FiberSample {
        FiberSample::at(Point3f::new(t * self.scale, 0.0, 0.0))
    }
}

fn bent_fiber() -> HermiteFiber {
    HermiteFiber::new(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 2.0, 0.0),
            Point3f::new(4.0, 0.0, 1.0),
            Point3f::new(6.0, 1.0, 3.0),
        ],
        TangentMode::Symmetric,
        Some(1.0),
    )
    .unwrap()
}

fn light_tube_config() -> TubeConfig {
    TubeConfig {
        axial_segments: 32,
        radial_segments: 12,
        ..TubeConfig::default()
    }
}

#[test]
fn test_reference_skeleton_scenario() {
    let fiber = MutableFiber::reference();
    let skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();

    assert_eq!(skeleton.segments(), 3);
    let points = &skeleton.line.geometry.points;
    assert_eq!(points.len(), 4);
    let expected = [0.0, 2.0 / 3.0, 4.0 / 3.0, 2.0];
    for (point, x) in points.iter().zip(expected) {
        assert_relative_eq!(*point, Point3f::new(x, 0.0, 0.0), epsilon = 1e-6);
    }
    assert_eq!(skeleton.line.geometry.positions().len(), 12);
}

#[test]
fn test_skeleton_samples_match_interpolation() {
    let fiber = bent_fiber();
    let skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();

    let segments = (fiber.length() * 1.5).floor() as usize;
    assert_eq!(skeleton.segments(), segments);
    assert_eq!(skeleton.line.geometry.len(), segments + 1);
    for (i, point) in skeleton.line.geometry.points.iter().enumerate() {
        let expected = fiber.interpolate(i as f32 / segments as f32).position;
        assert_relative_eq!(*point, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_skeleton_marker_resolution() {
    let fiber = MutableFiber::reference();
    let skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();
    let marker = SphereGeometry::new(0.5, 32, 32).unwrap();
    assert_eq!(skeleton.spheres.geometry.vertex_count(), 2 * marker.vertex_count());
    assert_eq!(skeleton.spheres.geometry.face_count(), 2 * marker.face_count());
}

#[test]
fn test_empty_control_points_give_empty_markers() {
    let mut fiber = MutableFiber::reference();
    fiber.control_points.clear();
    let mut skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();

    assert!(skeleton.spheres.geometry.is_empty());
    assert_eq!(skeleton.spheres.geometry.face_count(), 0);
    assert_eq!(skeleton.line.geometry.len(), 4);
    assert!(skeleton.refresh(&fiber).is_ok());
    assert!(skeleton.spheres.geometry.is_empty());
}

#[test]
fn test_skeleton_rejects_non_positive_length() {
    let mut fiber = MutableFiber::reference();
    fiber.length = 0.0;
    let result = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE);
    assert!(matches!(result, Err(phantomas_core::Error::InvalidSource(_))));

    fiber.length = -3.0;
    assert!(FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).is_err());
}

#[test]
fn test_short_fiber_clamps_to_one_segment() {
    let mut fiber = MutableFiber::reference();
    fiber.length = 0.5;
    let skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();
    assert_eq!(skeleton.segments(), 1);
    assert_eq!(skeleton.line.geometry.len(), 2);
}

#[test]
fn test_refresh_is_idempotent() {
    let fiber = bent_fiber();
    let region = IsotropicRegion::new(Point3f::new(1.0, -1.0, 2.0), 1.5).unwrap();
    let region_config = RegionConfig {
        width_segments: 16,
        height_segments: 16,
    };

    let mut skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();
    let mut tube = FiberTube::build(&fiber, &light_tube_config(), Color::WHITE).unwrap();
    let mut sphere = RegionSphere::build(&region, &region_config, Color::WHITE).unwrap();

    skeleton.refresh(&fiber).unwrap();
    tube.refresh(&fiber).unwrap();
    sphere.refresh(&region).unwrap();
    let first = (
        skeleton.line.geometry.clone(),
        skeleton.spheres.geometry.clone(),
        tube.mesh.geometry.clone(),
        sphere.mesh.geometry.clone(),
        sphere.mesh.position,
    );

    skeleton.refresh(&fiber).unwrap();
    tube.refresh(&fiber).unwrap();
    sphere.refresh(&region).unwrap();

    assert_eq!(skeleton.line.geometry, first.0);
    assert_eq!(skeleton.spheres.geometry, first.1);
    assert_eq!(tube.mesh.geometry, first.2);
    assert_eq!(sphere.mesh.geometry, first.3);
    assert_eq!(sphere.mesh.position, first.4);
}

#[test]
fn test_fixed_segment_count_survives_length_change() {
    let mut fiber = MutableFiber::reference();
    let mut skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();

    fiber.length = 10.0;
    fiber.scale = 10.0;
    skeleton.refresh(&fiber).unwrap();

    assert_eq!(skeleton.segments(), 3);
    assert_eq!(skeleton.line.geometry.len(), 4);
    assert_relative_eq!(
        *skeleton.line.geometry.points.last().unwrap(),
        Point3f::new(10.0, 0.0, 0.0)
    );
}

#[test]
fn test_recompute_policy_follows_length() {
    let mut fiber = MutableFiber::reference();
    let config = SkeletonConfig {
        segment_policy: SegmentPolicy::Recompute,
        ..SkeletonConfig::default()
    };
    let mut skeleton = FiberSkeleton::build(&fiber, &config, Color::WHITE).unwrap();

    fiber.length = 10.0;
    skeleton.refresh(&fiber).unwrap();
    assert_eq!(skeleton.segments(), 15);
    assert_eq!(skeleton.line.geometry.len(), 16);
}

#[test]
fn test_tube_follows_fiber_positions() {
    let fiber = bent_fiber();
    let config = light_tube_config();
    let tube = FiberTube::build(&fiber, &config, Color::WHITE).unwrap();

    let stride = config.radial_segments + 1;
    let vertices = &tube.mesh.geometry.vertices;
    for i in 0..=config.axial_segments {
        let ring = &vertices[i * stride..i * stride + config.radial_segments];
        let centroid = ring
            .iter()
            .fold(Vector3f::zeros(), |acc, v| acc + v.coords)
            / config.radial_segments as f32;
        let expected = fiber.interpolate(i as f32 / config.axial_segments as f32).position;
        assert_relative_eq!(Point3f::from(centroid), expected, epsilon = 1e-4);
    }
}

#[test]
fn test_tube_default_resolution() {
    let fiber = MutableFiber::reference();
    let tube = FiberTube::build(&fiber, &TubeConfig::default(), Color::WHITE).unwrap();
    assert_eq!(tube.mesh.geometry.vertex_count(), 257 * 65);
    assert_eq!(tube.mesh.geometry.face_count(), 2 * 256 * 64);
}

#[test]
fn test_radius_change_propagates_on_refresh() {
    let mut fiber = MutableFiber::reference();
    fiber.radius = Some(1.0);
    let mut tube = FiberTube::build(&fiber, &light_tube_config(), Color::WHITE).unwrap();
    let mut skeleton = FiberSkeleton::build(&fiber, &SkeletonConfig::default(), Color::WHITE).unwrap();
    let (min, max) = tube.mesh.geometry.bounding_box();
    assert_relative_eq!(max.y - min.y, 2.0, epsilon = 1e-3);

    fiber.radius = Some(2.0);
    tube.refresh(&fiber).unwrap();
    skeleton.refresh(&fiber).unwrap();

    let (min, max) = tube.mesh.geometry.bounding_box();
    assert_relative_eq!(max.y - min.y, 4.0, epsilon = 1e-3);
    assert_eq!(tube.radius(), 2.0);
    assert_eq!(tube.mesh.geometry.face_count(), 2 * 32 * 12);

    let (min, max) = skeleton.spheres.geometry.bounding_box();
    assert_relative_eq!(max.y - min.y, 4.0, epsilon = 1e-3);
    assert_eq!(skeleton.segments(), 3);
}

#[test]
fn test_tube_radius_fallback_on_refresh() {
    let mut fiber = MutableFiber::reference();
    fiber.radius = Some(1.0);
    let mut tube = FiberTube::build(&fiber, &light_tube_config(), Color::WHITE).unwrap();

    fiber.radius = None;
    tube.refresh(&fiber).unwrap();
    assert_eq!(tube.radius(), 0.5);
}

#[test]
fn test_reference_region_scenario() {
    let region = IsotropicRegion::new(Point3f::origin(), 1.0).unwrap();
    let sphere = RegionSphere::build(&region, &RegionConfig::default(), Color::WHITE).unwrap();

    assert_eq!(sphere.mesh.position, Point3f::origin());
    assert_eq!(sphere.config().width_segments, 128);
    assert_eq!(sphere.config().height_segments, 128);
    assert_eq!(sphere.mesh.geometry.vertex_count(), 129 * 129);
    assert_eq!(sphere.mesh.geometry.face_count(), 2 * 128 * 127);
    for v in &sphere.mesh.geometry.vertices {
        assert_relative_eq!(v.coords.norm(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_region_refresh_resizes_and_moves() {
    let mut region = IsotropicRegion::new(Point3f::origin(), 1.0).unwrap();
    let config = RegionConfig {
        width_segments: 12,
        height_segments: 10,
    };
    let mut sphere = RegionSphere::build(&region, &config, Color::WHITE).unwrap();
    let faces = sphere.mesh.geometry.face_count();

    region.radius = 2.0;
    region.center = Point3f::new(5.0, 0.0, -1.0);
    sphere.refresh(&region).unwrap();

    assert_eq!(sphere.mesh.position, Point3f::new(5.0, 0.0, -1.0));
    assert_eq!(sphere.mesh.geometry.face_count(), faces);
    let (min, max) = sphere.mesh.geometry.bounding_box();
    assert_relative_eq!(max.y - min.y, 4.0, epsilon = 1e-4);
    assert_eq!(sphere.mesh.revision, 1);
}

#[test]
fn test_phantom_scene_round() {
    let mut phantom = Phantom::new(
        vec![bent_fiber()],
        vec![IsotropicRegion::new(Point3f::new(0.0, 0.0, 5.0), 2.0).unwrap()],
    );
    let mut scene = PhantomScene::build_budgeted(
        &phantom,
        &MeshConstraints::default(),
        &mut phantomas_core::HashedPalette::new(3),
    )
    .unwrap();
    assert_eq!(scene.tubes[0].config().axial_segments, 128);
    assert_eq!(scene.regions[0].config().width_segments, 32);

    phantom.fibers[0].set_radius(Some(0.25)).unwrap();
    phantom.regions[0].center = Point3f::new(1.0, 1.0, 1.0);
    scene.refresh(&phantom).unwrap();

    assert_eq!(scene.tubes[0].radius(), 0.25);
    assert_eq!(scene.regions[0].mesh.position, Point3f::new(1.0, 1.0, 1.0));
    assert!(scene.total_faces() > 0);
}
