//! Discretization parameters
//!
//! Segment counts decide a representation's topology. They are fixed when a
//! representation is built; `refresh` only resamples positions (except for
//! the skeleton line under [`SegmentPolicy::Recompute`]).

use phantomas_core::Color;
use serde::{Deserialize, Serialize};

/// Decimal digits kept by [`round_to_precision`] unless told otherwise
pub const DEFAULT_PRECISION: u32 = 1;

/// Most path segments a skeleton line may have, whatever the fiber length
pub const MAX_LINE_SEGMENTS: usize = 1 << 20;

/// What a skeleton does with its path segment count on refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPolicy {
    /// Keep the count derived at build time, even if the fiber length changed
    #[default]
    Fixed,
    /// Re-derive the count from the current fiber length
    Recompute,
}

/// Skeleton builder settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Path segments per unit of fiber length
    pub length_factor: f32,
    /// Upper bound on path segments, if any
    pub max_line_segments: Option<usize>,
    /// Width and height segments of each control point marker
    pub marker_segments: usize,
    /// Marker radius used when the fiber has none
    pub default_marker_radius: f32,
    pub marker_color: Color,
    pub segment_policy: SegmentPolicy,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            length_factor: 1.5,
            max_line_segments: None,
            marker_segments: 32,
            default_marker_radius: 0.5,
            marker_color: Color::YELLOW,
            segment_policy: SegmentPolicy::Fixed,
        }
    }
}

/// Tube builder settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeConfig {
    pub axial_segments: usize,
    pub radial_segments: usize,
    /// Radius used when the fiber has none, on build and on refresh
    pub default_radius: f32,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            axial_segments: 256,
            radial_segments: 64,
            default_radius: 0.5,
        }
    }
}

/// Region builder settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub width_segments: usize,
    pub height_segments: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            width_segments: 128,
            height_segments: 128,
        }
    }
}

/// Settings for all three builders
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscretizationConfig {
    pub skeleton: SkeletonConfig,
    pub tube: TubeConfig,
    pub region: RegionConfig,
}

/// Segment ceilings for a whole phantom.
///
/// Each pair caps the total over all meshes of a kind and the count of a
/// single mesh; [`MeshConstraints::budget`] shares the total evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConstraints {
    pub max_total_axial_segments: usize,
    pub max_mesh_axial_segments: usize,

    pub max_total_radial_segments: usize,
    pub max_mesh_radial_segments: usize,

    pub max_total_line_segments: usize,
    pub max_mesh_line_segments: usize,

    pub max_total_skeleton_sphere_segments: usize,
    pub max_mesh_skeleton_sphere_segments: usize,

    pub max_total_isotropic_region_segments: usize,
    pub max_mesh_isotropic_region_segments: usize,
}

impl Default for MeshConstraints {
    fn default() -> Self {
        Self {
            max_total_axial_segments: 1440,
            max_mesh_axial_segments: 128,

            max_total_radial_segments: 480,
            max_mesh_radial_segments: 32,

            max_total_line_segments: 960,
            max_mesh_line_segments: 128,

            max_total_skeleton_sphere_segments: 240,
            max_mesh_skeleton_sphere_segments: 32,

            max_total_isotropic_region_segments: 1024,
            max_mesh_isotropic_region_segments: 32,
        }
    }
}

impl MeshConstraints {
    /// Per-mesh settings for a phantom with `fibers` fibers and `regions` regions
    pub fn budget(&self, fibers: usize, regions: usize) -> DiscretizationConfig {
        let skeleton = SkeletonConfig {
            max_line_segments: Some(share(
                self.max_total_line_segments,
                self.max_mesh_line_segments,
                fibers,
                1,
            )),
            marker_segments: share(
                self.max_total_skeleton_sphere_segments,
                self.max_mesh_skeleton_sphere_segments,
                fibers,
                3,
            ),
            ..SkeletonConfig::default()
        };
        let tube = TubeConfig {
            axial_segments: share(
                self.max_total_axial_segments,
                self.max_mesh_axial_segments,
                fibers,
                1,
            ),
            radial_segments: share(
                self.max_total_radial_segments,
                self.max_mesh_radial_segments,
                fibers,
                3,
            ),
            ..TubeConfig::default()
        };
        let sphere = share(
            self.max_total_isotropic_region_segments,
            self.max_mesh_isotropic_region_segments,
            regions,
            3,
        );
        let region = RegionConfig {
            width_segments: sphere,
            height_segments: sphere,
        };

        DiscretizationConfig {
            skeleton,
            tube,
            region,
        }
    }
}

/// `total / count` clamped to `[minimum, per_mesh]`; the ceiling wins
fn share(total: usize, per_mesh: usize, count: usize, minimum: usize) -> usize {
    if count == 0 {
        return per_mesh;
    }
    (total / count).max(minimum).min(per_mesh)
}

/// Round to `digits` decimal places
pub fn round_to_precision(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
