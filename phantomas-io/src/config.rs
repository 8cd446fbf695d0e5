//! Scene configuration files

use crate::{ensure_exists, ensure_json, Result};
use phantomas_geometry::{DiscretizationConfig, MeshConstraints};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Settings for turning a phantom into a scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Per-builder resolutions, used when `constraints` is absent
    pub discretization: DiscretizationConfig,
    /// Share segment budgets across the whole phantom instead
    pub constraints: Option<MeshConstraints>,
    /// Seed for random palette assignment; `None` cycles the palette
    pub color_seed: Option<u64>,
}

impl SceneConfig {
    /// Resolutions for a phantom of the given size
    pub fn resolve(&self, fibers: usize, regions: usize) -> DiscretizationConfig {
        match &self.constraints {
            Some(constraints) => constraints.budget(fibers, regions),
            None => self.discretization,
        }
    }
}

/// Load a [`SceneConfig`] from a JSON file; missing fields take defaults
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<SceneConfig> {
    let path = path.as_ref();
    ensure_exists(path)?;
    ensure_json(path)?;

    let text = fs::read_to_string(path)?;
    let config: SceneConfig = serde_json::from_str(&text)?;
    info!(path = %path.display(), budgeted = config.constraints.is_some(), "scene config loaded");
    Ok(config)
}
