//! Fiber and isotropic region discretization
//!
//! Turns phantom sources into renderable geometry:
//! - [`FiberSkeleton`]: sampled path polyline plus control point markers
//! - [`FiberTube`]: swept tube surface following the fiber path
//! - [`RegionSphere`]: sphere mesh for an isotropic region
//!
//! Every representation is built once per source and kept in sync with
//! `refresh`, which resamples positions without changing topology.

pub mod source;
pub mod curve;
pub mod sphere;
pub mod tube;
pub mod config;
pub mod skeleton;
pub mod fiber_tube;
pub mod region;
pub mod phantom;

pub use source::*;
pub use curve::*;
pub use sphere::*;
pub use tube::*;
pub use config::*;
pub use skeleton::*;
pub use fiber_tube::*;
pub use region::*;
pub use phantom::*;
