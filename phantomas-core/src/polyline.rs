//! Polyline data structure for line-strip geometry

use crate::point::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An ordered run of points drawn as a connected line strip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3f>,
}

impl Polyline {
    /// Create a new empty polyline
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polyline from its points
    pub fn from_points(points: Vec<Point3f>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of line segments between consecutive points
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Flat buffer of `3 * len()` coordinates
    pub fn positions(&self) -> &[f32] {
        flatten_points(&self.points)
    }

    /// Total length of the strip
    pub fn length(&self) -> f32 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b - a).norm())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyline_measures() {
        let line = Polyline::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(3.0, 0.0, 0.0),
            Point3f::new(3.0, 4.0, 0.0),
        ]);
        assert_eq!(line.len(), 3);
        assert_eq!(line.segment_count(), 2);
        assert_eq!(line.positions().len(), 9);
        assert_relative_eq!(line.length(), 7.0);
    }

    #[test]
    fn test_empty_polyline() {
        let line = Polyline::new();
        assert!(line.is_empty());
        assert_eq!(line.segment_count(), 0);
        assert_eq!(line.length(), 0.0);
    }
}
