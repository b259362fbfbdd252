//! Error types for the imgscan cataloging pipeline.
//!
//! Errors are split into fatal configuration errors, which abort a run, and
//! per-stage pipeline errors. Most pipeline errors are recovered at the
//! narrowest scope (one subtree, one file); only `Write` is surfaced.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for imgscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors. All of these are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The input root does not exist or is not a directory
    #[error("Input folder does not exist: {0}")]
    InputNotFound(PathBuf),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A directory could not be listed during traversal
    #[error("Cannot read directory {path}: {message}")]
    SubtreeRead { path: PathBuf, message: String },

    /// Stat or full-file read failed; the file contributes no record
    #[error("Extraction failed for {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    /// Image header could not be parsed; dimensions fall back to zero
    #[error("Cannot probe dimensions of {path}: {message}")]
    DimensionProbe { path: PathBuf, message: String },

    /// Manifest serialization or write failed
    #[error("Failed to write manifest {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Convenience type alias for imgscan results.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
