//! Engine configuration
//!
//! Configuration can come from:
//! - Default values
//! - A JSON document or file
//! - Environment variables (`RACOR_RESOLUTION`, `RACOR_ABSENT_AS_NULL`)

use crate::error::{Error, ResolutionMode, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable selecting the [`ResolutionMode`]
pub const ENV_RESOLUTION: &str = "RACOR_RESOLUTION";

/// Environment variable toggling [`EngineConfig::absent_as_null`]
pub const ENV_ABSENT_AS_NULL: &str = "RACOR_ABSENT_AS_NULL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reaction to transforms that cannot be constructed
    pub resolution: ResolutionMode,

    /// When a source path misses and the spec has no fallback, pass `null`
    /// through the transform and write the result. When false the spec is
    /// skipped and the output returned unchanged.
    pub absent_as_null: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionMode::Warn,
            absent_as_null: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Configuration {
            message: format!("invalid configuration document: {}", e),
            source: Some(e.into()),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("failed to read config file {}: {}", path.display(), e),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Defaults overridden by whichever environment variables are set
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps variable names to values
    pub fn merge_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_RESOLUTION) {
            self.resolution = mode.parse()?;
        }
        if let Some(flag) = lookup(ENV_ABSENT_AS_NULL) {
            self.absent_as_null = parse_flag(ENV_ABSENT_AS_NULL, &flag)?;
        }
        Ok(self)
    }

    pub fn with_resolution(mut self, resolution: ResolutionMode) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_absent_as_null(mut self, absent_as_null: bool) -> Self {
        self.absent_as_null = absent_as_null;
        self
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Configuration {
            message: format!("{} must be a boolean, got '{}'", name, other),
            source: None,
        }),
    }
}
