//! Camera and navigation settings with TOML preset support.
//!
//! Options serialize to/from TOML so a host can persist a user's
//! navigation preferences next to its own settings.

mod camera;
mod navigation;

use std::path::Path;

pub use camera::CameraOptions;
pub use navigation::NavOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Navigation feel constants, key preset and locks.
    pub navigation: NavOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults; values
    /// that would break navigation are rejected.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        options.navigation.validate()?;
        log::debug!("loaded navigation options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), NavError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::debug!("saved navigation options to {}", path.display());
        Ok(())
    }
}
