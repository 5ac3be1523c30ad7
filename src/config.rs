//! # Configuration Module
//!
//! Runtime settings for a world. Chunk dimensions are compile-time constants in
//! the chunk module; everything here can be overridden from a JSON file.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// Settings used when constructing a [`World`](crate::World).
///
/// Missing fields fall back to [`WorldConfig::default`], so a config file only
/// has to name what it changes:
///
/// ```
/// use voxel_world::WorldConfig;
///
/// let config = WorldConfig::from_json_str(r#"{ "grid_width": 2, "seed": 7 }"#).unwrap();
/// assert_eq!(config.grid_width, 2);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.grid_depth, WorldConfig::default().grid_depth);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Folder holding `{x}_{z}.chunk` files and the `meta_data` record.
    pub save_folder: PathBuf,
    /// Forces a world seed. When absent the stored seed is used, or a random one
    /// for a fresh save.
    pub seed: Option<u32>,
    /// Number of chunks along x, centred on chunk (0, 0).
    pub grid_width: i32,
    /// Number of chunks along z, centred on chunk (0, 0).
    pub grid_depth: i32,
    /// Octave count of the terrain noise.
    pub noise_octaves: usize,
    /// Base frequency of the terrain noise, in cycles per block.
    pub noise_frequency: f64,
    /// Vertical acceleration applied by [`MovingObject::step`](crate::MovingObject::step).
    pub gravity: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            save_folder: PathBuf::from("saves/world"),
            seed: None,
            grid_width: 4,
            grid_depth: 4,
            noise_octaves: 4,
            noise_frequency: 0.01,
            gravity: -20.0,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: &Path) -> WorldResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| WorldError::io(path, err))?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded world configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = WorldConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = WorldConfig::from_json_str("{ grid_width: ").unwrap_err();
        assert!(matches!(err, WorldError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WorldConfig::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }
}
