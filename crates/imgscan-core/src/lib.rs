//! imgscan Core - embeddable image cataloging library.
//!
//! Walks a folder of images and produces one [`ImageRecord`] per image:
//! dimensions, byte size, SHA-256 content hash, MIME type, and a published
//! URL built from a configured base path.
//!
//! # Architecture
//!
//! ```text
//! Folder → Discover → (stat, probe header, hash, classify) per file → JSON manifest
//! ```
//!
//! A file that cannot be read is logged and left out; a file whose header
//! cannot be parsed is kept with zero dimensions. Only a missing input folder
//! or a failed manifest write aborts a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use imgscan_core::{Cataloger, Config, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> imgscan_core::Result<()> {
//!     let config = Config::load()?;
//!     let cataloger = Cataloger::new(&config);
//!
//!     let catalog = cataloger.run(&config.input_folder(), |_, _| {}).await?;
//!     imgscan_core::write_manifest(&config.output_file(), &catalog.records, OutputFormat::Json, true)?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, ScanError};
pub use output::{write_manifest, OutputFormat, OutputWriter};
pub use pipeline::{Catalog, Cataloger, DiscoveredFile, Hasher, MetadataExtractor};
pub use types::{ImageRecord, Progress, ScanStats, UploadedAt, Uploader};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
