//! Fiber and region sources
//!
//! Builders only ever read sources. A source is free to change between
//! frames; the owner of a representation calls `refresh` afterwards.

use phantomas_core::{is_finite_point, Error, Point3f, Result, Vector3f};
use serde::{Deserialize, Serialize};

/// Samples per Hermite span used to estimate arc length
const LENGTH_SAMPLES_PER_SPAN: usize = 32;

/// Result of evaluating a fiber at a normalized parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberSample {
    pub position: Point3f,
    /// Derivative of the position with respect to `t`, when the source knows it
    pub tangent: Option<Vector3f>,
}

impl FiberSample {
    pub fn at(position: Point3f) -> Self {
        Self {
            position,
            tangent: None,
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3f) -> Self {
        self.tangent = Some(tangent);
        self
    }
}

/// A parametric fiber path with control points and a radius
pub trait FiberSource {
    /// Points the path was fitted through
    fn control_points(&self) -> &[Point3f];

    /// Tube radius; `None` lets the builder pick its default
    fn radius(&self) -> Option<f32>;

    /// Length of the path in scene units
    fn length(&self) -> f32;

    /// Evaluate the path at `t` in `[0, 1]`
    fn interpolate(&self, t: f32) -> FiberSample;
}

/// A spherical region with a center and a radius
pub trait RegionSource {
    fn center(&self) -> Point3f;
    fn radius(&self) -> f32;
}

/// Check the fields every fiber builder relies on: finite control points
/// and, when present, a finite non-negative radius.
pub fn validate_fiber<F: FiberSource + ?Sized>(fiber: &F) -> Result<()> {
    if let Some(radius) = fiber.radius() {
        check_radius(radius, "fiber")?;
    }
    if let Some(index) = fiber.control_points().iter().position(|p| !is_finite_point(p)) {
        return Err(Error::invalid_source(format!(
            "fiber control point {} has a non-finite coordinate",
            index
        )));
    }
    Ok(())
}

/// Check that a fiber length can be discretized
pub fn validate_length(length: f32) -> Result<()> {
    if !length.is_finite() || length <= 0.0 {
        return Err(Error::invalid_source(format!(
            "fiber length must be positive and finite, got {}",
            length
        )));
    }
    Ok(())
}

/// Check a region's center and radius
pub fn validate_region<R: RegionSource + ?Sized>(region: &R) -> Result<()> {
    check_radius(region.radius(), "region")?;
    if !is_finite_point(&region.center()) {
        return Err(Error::invalid_source("region center has a non-finite coordinate"));
    }
    Ok(())
}

fn check_radius(radius: f32, what: &str) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Error::invalid_source(format!(
            "{} radius must be finite and non-negative, got {}",
            what, radius
        )));
    }
    Ok(())
}

/// How knot tangents are derived from neighbouring control points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TangentMode {
    /// Central difference of both neighbours
    #[default]
    Symmetric,
    /// Difference to the previous control point
    Incoming,
    /// Difference to the next control point
    Outgoing,
}

/// Cubic Hermite fiber through its control points.
///
/// Control point `i` of `n` is reached at `t = i / (n - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteFiber {
    control_points: Vec<Point3f>,
    tangents: Vec<Vector3f>,
    mode: TangentMode,
    radius: Option<f32>,
    length: f32,
}

impl HermiteFiber {
    /// Fit a fiber through at least two control points
    pub fn new(control_points: Vec<Point3f>, mode: TangentMode, radius: Option<f32>) -> Result<Self> {
        let mut fiber = Self {
            control_points: Vec::new(),
            tangents: Vec::new(),
            mode,
            radius,
            length: 0.0,
        };
        fiber.set_control_points(control_points)?;
        validate_fiber(&fiber)?;
        Ok(fiber)
    }

    pub fn tangent_mode(&self) -> TangentMode {
        self.mode
    }

    /// Knot tangents in `t` units
    pub fn tangents(&self) -> &[Vector3f] {
        &self.tangents
    }

    pub fn set_control_points(&mut self, control_points: Vec<Point3f>) -> Result<()> {
        if control_points.len() < 2 {
            return Err(Error::invalid_source(format!(
                "a fiber needs at least 2 control points, got {}",
                control_points.len()
            )));
        }
        if control_points.iter().any(|p| !is_finite_point(p)) {
            return Err(Error::invalid_source("fiber control points must be finite"));
        }
        self.control_points = control_points;
        self.refit();
        Ok(())
    }

    pub fn set_control_point(&mut self, index: usize, point: Point3f) -> Result<()> {
        if !is_finite_point(&point) {
            return Err(Error::invalid_source("fiber control points must be finite"));
        }
        let count = self.control_points.len();
        let slot = self.control_points.get_mut(index).ok_or_else(|| {
            Error::InvalidData(format!("control point {} out of range ({})", index, count))
        })?;
        *slot = point;
        self.refit();
        Ok(())
    }

    pub fn set_radius(&mut self, radius: Option<f32>) -> Result<()> {
        if let Some(r) = radius {
            check_radius(r, "fiber")?;
        }
        self.radius = radius;
        Ok(())
    }

    pub fn set_tangent_mode(&mut self, mode: TangentMode) {
        self.mode = mode;
        self.refit();
    }

    /// Move every control point by `offset`
    pub fn translate(&mut self, offset: Vector3f) {
        for point in &mut self.control_points {
            *point += offset;
        }
    }

    fn refit(&mut self) {
        self.tangents = knot_tangents(&self.control_points, self.mode);
        self.length = self.estimate_length();
    }

    fn estimate_length(&self) -> f32 {
        let spans = self.control_points.len() - 1;
        let samples = spans * LENGTH_SAMPLES_PER_SPAN;
        let mut previous = self.control_points[0];
        let mut length = 0.0;
        for i in 1..=samples {
            let current = self.interpolate(i as f32 / samples as f32).position;
            length += (current - previous).norm();
            previous = current;
        }
        length
    }
}

impl FiberSource for HermiteFiber {
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
        let spans = self.control_points.len() - 1;
        let h = 1.0 / spans as f32;
        let u = t.clamp(0.0, 1.0) * spans as f32;
        let k = (u.floor() as usize).min(spans - 1);
        let s = u - k as f32;

        let (p0, p1) = (self.control_points[k].coords, self.control_points[k + 1].coords);
        let (m0, m1) = (self.tangents[k] * h, self.tangents[k + 1] * h);

        let (s2, s3) = (s * s, s * s * s);
        let position = p0 * (2.0 * s3 - 3.0 * s2 + 1.0)
            + m0 * (s3 - 2.0 * s2 + s)
            + p1 * (-2.0 * s3 + 3.0 * s2)
            + m1 * (s3 - s2);
        let derivative = p0 * (6.0 * s2 - 6.0 * s)
            + m0 * (3.0 * s2 - 4.0 * s + 1.0)
            + p1 * (-6.0 * s2 + 6.0 * s)
            + m1 * (3.0 * s2 - 2.0 * s);

        FiberSample::at(Point3f::from(position)).with_tangent(derivative / h)
    }
}

fn knot_tangents(points: &[Point3f], mode: TangentMode) -> Vec<Vector3f> {
    let n = points.len();
    let scale = (n - 1) as f32;
    let forward = |i: usize| (points[i + 1] - points[i]) * scale;

    (0..n)
        .map(|i| match mode {
            TangentMode::Symmetric if i > 0 && i + 1 < n => (points[i + 1] - points[i - 1]) * (scale / 2.0),
            TangentMode::Incoming if i > 0 => forward(i - 1),
            TangentMode::Outgoing if i + 1 < n => forward(i),
            _ if i == 0 => forward(0),
            _ => forward(n - 2),
        })
        .collect()
}

/// A fiber defined by an arbitrary closure
pub struct ParametricFiber<F> {
    pub control_points: Vec<Point3f>,
    pub radius: Option<f32>,
    pub length: f32,
    path: F,
}

impl<F> ParametricFiber<F>
where
    F: Fn(f32) -> FiberSample,
{
    pub fn new(control_points: Vec<Point3f>, radius: Option<f32>, length: f32, path: F) -> Self {
        Self {
            control_points,
            radius,
            length,
            path,
        }
    }
}

impl<F> FiberSource for ParametricFiber<F>
where
    F: Fn(f32) -> FiberSample,
{
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
        (self.path)(t)
    }
}

/// An isotropic spherical region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsotropicRegion {
    pub center: Point3f,
    pub radius: f32,
}

impl IsotropicRegion {
    pub fn new(center: Point3f, radius: f32) -> Result<Self> {
        let region = Self { center, radius };
        validate_region(&region)?;
        Ok(region)
    }
}

impl RegionSource for IsotropicRegion {
    fn center(&self) -> Point3f {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
