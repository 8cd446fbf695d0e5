//! I/O for phantoms and their geometry
//!
//! Reads phantom descriptions and discretization settings from JSON files
//! and exports built scenes as Wavefront OBJ.

pub mod error;
pub mod config;
pub mod phantom_json;
pub mod obj;

pub use error::*;
pub use config::{read_config, SceneConfig};
pub use phantom_json::{parse_phantom, read_phantom, write_phantom, LoadedPhantom, PhantomDescription};
pub use obj::ObjWriter;

use std::path::Path;

/// Fail with [`IoError::FileNotFound`] before trying to open a missing file
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(IoError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Reject anything but a `.json` extension
pub(crate) fn ensure_json(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(()),
        other => Err(IoError::InvalidFormat {
            format: format!("expected a .json file, got {:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests;
