//! Phantom description files
//!
//! ```json
//! {
//!   "fiber_geometries": {
//!     "fiber_a": { "control_points": [[0, 0, 0], [5, 2, 0]], "tangents": "symmetric", "radius": 1.5 }
//!   },
//!   "isotropic_regions": {
//!     "csf": { "center": [0, 0, 10], "radius": 4 }
//!   }
//! }
//! ```
//!
//! Entries are keyed by name and kept in name order.

use crate::{ensure_exists, ensure_json, IoError, Result};
use phantomas_core::{point_from_array, point_to_array};
use phantomas_geometry::{FiberSource, HermiteFiber, IsotropicRegion, Phantom, TangentMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One fiber as written in a description file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberDescription {
    pub control_points: Vec<[f32; 3]>,
    #[serde(default)]
    pub tangents: TangentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

/// One isotropic region as written in a description file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDescription {
    pub center: [f32; 3],
    pub radius: f32,
}

/// Raw contents of a description file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhantomDescription {
    #[serde(default)]
    pub fiber_geometries: BTreeMap<String, FiberDescription>,
    #[serde(default)]
    pub isotropic_regions: BTreeMap<String, RegionDescription>,
}

/// A phantom together with the names its sources were loaded under
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPhantom {
    pub phantom: Phantom,
    pub fiber_names: Vec<String>,
    pub region_names: Vec<String>,
}

impl PhantomDescription {
    /// Validate every entry and build the phantom
    pub fn into_phantom(self) -> Result<LoadedPhantom> {
        let mut loaded = LoadedPhantom::default();

        for (name, fiber) in self.fiber_geometries {
            let points = fiber.control_points.into_iter().map(point_from_array).collect();
            let fiber = HermiteFiber::new(points, fiber.tangents, fiber.radius)
                .map_err(|e| invalid_entry("fiber", &name, e))?;
            debug!(name = %name, length = fiber.length(), "fiber loaded");
            loaded.phantom.fibers.push(fiber);
            loaded.fiber_names.push(name);
        }

        for (name, region) in self.isotropic_regions {
            let region = IsotropicRegion::new(point_from_array(region.center), region.radius)
                .map_err(|e| invalid_entry("region", &name, e))?;
            loaded.phantom.regions.push(region);
            loaded.region_names.push(name);
        }

        Ok(loaded)
    }

    /// Describe a phantom; sources without a name get `fiber_<i>` / `region_<i>`
    pub fn from_phantom(loaded: &LoadedPhantom) -> Self {
        let name_of = |names: &[String], prefix: &str, i: usize| {
            names.get(i).cloned().unwrap_or_else(|| format!("{}_{}", prefix, i))
        };

        let fiber_geometries = loaded
            .phantom
            .fibers
            .iter()
            .enumerate()
            .map(|(i, fiber)| {
                let description = FiberDescription {
                    control_points: fiber.control_points().iter().map(point_to_array).collect(),
                    tangents: fiber.tangent_mode(),
                    radius: fiber.radius(),
                };
                (name_of(&loaded.fiber_names, "fiber", i), description)
            })
            .collect();

        let isotropic_regions = loaded
            .phantom
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let description = RegionDescription {
                    center: point_to_array(&region.center),
                    radius: region.radius,
                };
                (name_of(&loaded.region_names, "region", i), description)
            })
            .collect();

        Self {
            fiber_geometries,
            isotropic_regions,
        }
    }
}

fn invalid_entry(kind: &str, name: &str, error: phantomas_core::Error) -> IoError {
    IoError::ParseError {
        message: format!("{} '{}': {}", kind, name, error),
    }
}

/// Parse a description from JSON text
pub fn parse_phantom(text: &str) -> Result<LoadedPhantom> {
    let description: PhantomDescription = serde_json::from_str(text)?;
    description.into_phantom()
}

/// Load a description file
pub fn read_phantom<P: AsRef<Path>>(path: P) -> Result<LoadedPhantom> {
    let path = path.as_ref();
    ensure_exists(path)?;
    ensure_json(path)?;

    let loaded = parse_phantom(&fs::read_to_string(path)?)?;
    info!(
        path = %path.display(),
        fibers = loaded.phantom.fibers.len(),
        regions = loaded.phantom.regions.len(),
        "phantom loaded"
    );
    Ok(loaded)
}

/// Write a description file
pub fn write_phantom<P: AsRef<Path>>(loaded: &LoadedPhantom, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_json(path)?;
    let text = serde_json::to_string_pretty(&PhantomDescription::from_phantom(loaded))?;
    fs::write(path, text)?;
    debug!(path = %path.display(), "phantom written");
    Ok(())
}
