//! Editor configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Origin, Result};
use crate::tool::{BuildingParams, MAX_BRUSH_SIZE};

/// Environment variable naming a config file for the CLI
pub const CONFIG_ENV_VAR: &str = "PALMPAINT_CONFIG";

/// Initial grid extent for new projects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub nx: usize,
    pub ny: usize,
    /// Cell size in meters
    pub res: f64,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self { nx: 16, ny: 16, res: 4.0 }
    }
}

/// Free-text raster metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverInfo {
    pub title: String,
    pub author: String,
}

impl Default for DriverInfo {
    fn default() -> Self {
        Self {
            title: "Idealized Scenario".to_string(),
            author: "palmpaint".to_string(),
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridDefaults,
    pub origin: Origin,
    pub driver: DriverInfo,
    /// Initial brush size (odd, 1..=9)
    pub brush_size: u32,
    /// Initial building tool parameters. A missing height follows the grid resolution.
    pub building: Option<BuildingParams>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridDefaults::default(),
            origin: Origin::default(),
            driver: DriverInfo::default(),
            brush_size: 1,
            building: None,
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, else from `PALMPAINT_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(env_path) => Self::load(env_path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Reject values the editor cannot start from
    pub fn validate(&self) -> Result<()> {
        let GridDefaults { nx, ny, res } = self.grid;
        if nx == 0 || ny == 0 || !(res > 0.0) {
            return Err(Error::InvalidDimensions { nx, ny, res });
        }
        if self.brush_size == 0 || self.brush_size > MAX_BRUSH_SIZE {
            return Err(Error::Config(format!(
                "brush_size must be within 1..={}, got {}",
                MAX_BRUSH_SIZE, self.brush_size
            )));
        }
        Ok(())
    }

    /// Building parameters for a fresh tool context
    pub fn building_params(&self) -> BuildingParams {
        self.building
            .unwrap_or_else(|| BuildingParams::for_resolution(self.grid.res))
    }
}
