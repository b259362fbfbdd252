//! Image cataloging pipeline components.
//!
//! - **discovery**: Find image files in directories
//! - **mime**: Extension-based MIME type inference
//! - **probe**: Header-only dimension probing
//! - **hash**: SHA-256 content hashing
//! - **extract**: Build one record per file
//! - **processor**: Orchestrates discovery and extraction

pub mod discovery;
pub mod extract;
pub mod hash;
pub mod mime;
pub mod probe;
pub mod processor;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use extract::MetadataExtractor;
pub use hash::Hasher;
pub use probe::DimensionProbe;
pub use processor::{Catalog, Cataloger};
