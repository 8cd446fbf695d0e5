//! Core traits for phantomas geometry

use crate::{mesh::*, point::*, polyline::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Bounding box of a point set; the origin box when the set is empty
pub fn bounds_of<'a, I>(points: I) -> (Point3f, Point3f)
where
    I: IntoIterator<Item = &'a Point3f>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return (Point3f::origin(), Point3f::origin());
    };

    iter.fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)))
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(&self.vertices)
    }
}

impl Drawable for Polyline {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(&self.points)
    }
}
