//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to read images from and where to write the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root folder scanned for images
    pub folder: PathBuf,

    /// Manifest output file
    pub output_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("./images"),
            output_file: PathBuf::from("./output/image-metadata.json"),
        }
    }
}

/// How published locations are constructed for each record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Prefix stored in `path` and joined with the file name to build `url`
    pub base_path: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            base_path: "/uploads".to_string(),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Files extracted concurrently. 1 processes strictly one file at a time.
    pub parallel_workers: usize,

    /// Sort sibling entries by name during traversal
    pub sort_entries: bool,

    /// Follow symbolic links while walking the tree
    pub follow_links: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 1,
            sort_entries: true,
            follow_links: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
