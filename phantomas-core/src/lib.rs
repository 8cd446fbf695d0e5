//! Core data structures for phantomas
//!
//! This crate provides the renderable building blocks shared by the
//! geometry builders and the exporters: points, triangle meshes, polylines,
//! transforms, colors, materials and the owned scene objects that wrap them.

pub mod point;
pub mod mesh;
pub mod polyline;
pub mod traits;
pub mod transform;
pub mod color;
pub mod object;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use polyline::*;
pub use traits::*;
pub use transform::*;
pub use color::*;
pub use object::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, Rotation3, Unit};
