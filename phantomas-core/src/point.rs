//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Build a point from a `[x, y, z]` triple
pub fn point_from_array(xyz: [f32; 3]) -> Point3f {
    Point3f::new(xyz[0], xyz[1], xyz[2])
}

/// Flatten a point into a `[x, y, z]` triple
pub fn point_to_array(point: &Point3f) -> [f32; 3] {
    [point.x, point.y, point.z]
}

/// Whether every coordinate of the point is finite
pub fn is_finite_point(point: &Point3f) -> bool {
    point.iter().all(|c| c.is_finite())
}

/// View a slice of points as a flat `[x0, y0, z0, x1, ...]` buffer
pub fn flatten_points(points: &[Point3f]) -> &[f32] {
    bytemuck::cast_slice(points)
}
