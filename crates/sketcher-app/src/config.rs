//! Application configuration.

use serde::{Deserialize, Serialize};
use sketcher_core::{DEFAULT_COLOR, FileStorage, StorageResult};
use sketcher_render::{DEFAULT_PICK_TOLERANCE, parse_hex_color};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the application.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding saved documents. `None` uses the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Initial drawing color for new shapes.
    pub default_color: String,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Pick tolerance in screen pixels.
    pub pick_tolerance: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            default_color: DEFAULT_COLOR.to_string(),
            log_filter: "info".to_string(),
            pick_tolerance: DEFAULT_PICK_TOLERANCE,
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if parse_hex_color(&self.default_color).is_none() {
            return Err(ConfigError::Invalid(format!(
                "default_color {:?} is not a #rgb or #rrggbb color",
                self.default_color
            )));
        }
        if !self.pick_tolerance.is_finite() || self.pick_tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pick_tolerance must be positive, got {}",
                self.pick_tolerance
            )));
        }
        Ok(())
    }

    /// Open the document store this config points at.
    pub fn storage(&self) -> StorageResult<FileStorage> {
        match &self.storage_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::default_location(),
        }
    }
}
