//! Parametric curves and moving frames

use crate::source::FiberSource;
use phantomas_core::{Point3f, Rotation3, Unit, Vector3f};

/// Parameter step for finite-difference tangents
const TANGENT_DELTA: f32 = 1e-4;

/// Orthonormal frames sampled along a curve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrenetFrames {
    pub tangents: Vec<Vector3f>,
    pub normals: Vec<Vector3f>,
    pub binormals: Vec<Vector3f>,
}

impl FrenetFrames {
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// A curve evaluated on `t` in `[0, 1]`
pub trait ParametricCurve {
    fn point(&self, t: f32) -> Point3f;

    /// Unit tangent at `t`
    fn tangent(&self, t: f32) -> Vector3f {
        finite_difference_tangent(self, t)
    }

    /// Frames at `t = i / segments` for `i = 0..=segments`.
    ///
    /// The first normal is picked perpendicular to the tangent along the
    /// tangent's smallest axis; later frames are parallel transported so the
    /// tube does not twist.
    fn frenet_frames(&self, segments: usize) -> FrenetFrames {
        let segments = segments.max(1);
        let tangents: Vec<Vector3f> = (0..=segments)
            .map(|i| self.tangent(i as f32 / segments as f32))
            .collect();

        let mut normals = Vec::with_capacity(tangents.len());
        let mut binormals = Vec::with_capacity(tangents.len());

        let first = tangents[0];
        let normal = initial_normal(&first);
        normals.push(normal);
        binormals.push(first.cross(&normal));

        for i in 1..tangents.len() {
            let mut normal = normals[i - 1];
            let axis = tangents[i - 1].cross(&tangents[i]);
            if axis.norm() > f32::EPSILON {
                let theta = tangents[i - 1].dot(&tangents[i]).clamp(-1.0, 1.0).acos();
                normal = Rotation3::from_axis_angle(&Unit::new_normalize(axis), theta) * normal;
            }
            normals.push(normal);
            binormals.push(tangents[i].cross(&normal));
        }

        FrenetFrames {
            tangents,
            normals,
            binormals,
        }
    }
}

/// Central difference tangent, one-sided at the ends of the parameter range
pub fn finite_difference_tangent<C: ParametricCurve + ?Sized>(curve: &C, t: f32) -> Vector3f {
    let t1 = (t - TANGENT_DELTA).max(0.0);
    let t2 = (t + TANGENT_DELTA).min(1.0);
    (curve.point(t2) - curve.point(t1))
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3f::x)
}

fn initial_normal(tangent: &Vector3f) -> Vector3f {
    let abs = tangent.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3f::x()
    } else if abs.y <= abs.z {
        Vector3f::y()
    } else {
        Vector3f::z()
    };
    let side = tangent.cross(&axis).try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::y);
    tangent.cross(&side)
}

/// Curve view of a fiber: positions come straight from `interpolate`
pub struct FiberCurve<'a, F: ?Sized> {
    fiber: &'a F,
}

impl<'a, F: FiberSource + ?Sized> FiberCurve<'a, F> {
    pub fn new(fiber: &'a F) -> Self {
        Self { fiber }
    }
}

impl<F: FiberSource + ?Sized> ParametricCurve for FiberCurve<'_, F> {
    fn point(&self, t: f32) -> Point3f {
        self.fiber.interpolate(t).position
    }

    fn tangent(&self, t: f32) -> Vector3f {
        self.fiber
            .interpolate(t)
            .tangent
            .and_then(|d| d.try_normalize(f32::EPSILON))
            .unwrap_or_else(|| finite_difference_tangent(self, t))
    }
}
