//! Configuration management for imgscan.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so a missing file or a partial file are both valid.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::types::Uploader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for imgscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input folder and manifest location
    pub input: InputConfig,

    /// Base path used for `path` and `url`
    pub publish: PublishConfig,

    /// Identity stamped into every record
    pub uploader: Uploader,

    /// Processing settings
    pub processing: ProcessingConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.imgscan.imgscan/config.toml
    /// - Linux: ~/.config/imgscan/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\imgscan\config\config.toml
    ///
    /// Falls back to ~/.imgscan/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "imgscan", "imgscan")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".imgscan").join("config.toml")
            })
    }

    /// Resolved input folder (with ~ expansion).
    pub fn input_folder(&self) -> PathBuf {
        expand(&self.input.folder)
    }

    /// Resolved manifest path (with ~ expansion).
    pub fn output_file(&self) -> PathBuf {
        expand(&self.input.output_file)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}
