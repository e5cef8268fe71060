//! Tool configuration.
//!
//! Read from `<config dir>/miro/sniff.json`. Every field has a default, so
//! a missing file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use miro_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::{LogRotation, default_log_directory};

/// How reports are printed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per input.
    #[default]
    Text,
    /// One JSON object per input.
    Json,
}

/// Configuration of `miro-sniff`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SniffConfig {
    /// Report format.
    #[serde(default)]
    pub output: OutputFormat,
    /// Also write JSON logs to `log_directory`.
    #[serde(default)]
    pub log_to_file: bool,
    /// Where log files go when `log_to_file` is set.
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,
    /// How often log files rotate.
    #[serde(default)]
    pub log_rotation: LogRotation,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            log_to_file: false,
            log_directory: default_log_directory(),
            log_rotation: LogRotation::default(),
        }
    }
}

impl SniffConfig {
    /// Load configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to read config file: {e}"),
        })?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {e}")))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Get the path to the config file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("miro")
        .join("sniff.json")
}
