//! Affine placement of geometry

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A homogeneous 4x4 transform used to place primitives before merging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Translation that moves the origin onto `point`
    pub fn to_point(point: &Point3<f32>) -> Self {
        Self::translation(point.coords)
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Transform a surface normal (inverse transpose of the linear part), renormalized
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let linear = self.linear();
        let mapped = match linear.try_inverse() {
            Some(inverse) => inverse.transpose() * normal,
            None => linear * normal,
        };
        mapped.try_normalize(f32::EPSILON).unwrap_or(*normal)
    }

    fn linear(&self) -> Matrix3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }
}
