//! Per-file metadata extraction.

use std::path::Path;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageRecord, UploadedAt, Uploader};

use super::hash::Hasher;
use super::mime;
use super::probe::DimensionProbe;

/// Turns one image path into one [`ImageRecord`].
///
/// Holds the base path and uploader identity so every record built by the
/// same extractor carries the same values.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    base_path: String,
    uploader: Uploader,
}

impl MetadataExtractor {
    /// Create an extractor from the publish and uploader settings.
    pub fn new(config: &Config) -> Self {
        Self::with_identity(config.publish.base_path.clone(), config.uploader.clone())
    }

    pub fn with_identity(base_path: impl Into<String>, uploader: Uploader) -> Self {
        Self {
            base_path: base_path.into(),
            uploader,
        }
    }

    /// Extract a record for `path`.
    ///
    /// Stat or read failures fail the whole record with
    /// [`PipelineError::Extraction`]. A header that cannot be probed is logged
    /// and leaves width and height at 0; the record is still produced.
    pub fn extract(&self, path: &Path) -> PipelineResult<ImageRecord> {
        let start = std::time::Instant::now();

        let stat = std::fs::metadata(path).map_err(|e| PipelineError::Extraction {
            path: path.to_path_buf(),
            message: format!("Cannot stat file: {}", e),
        })?;

        let bytes = std::fs::read(path).map_err(|e| PipelineError::Extraction {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;
        let size = bytes.len() as u64;
        if size != stat.len() {
            tracing::debug!(
                "{:?} changed size during extraction ({} -> {} bytes)",
                path,
                stat.len(),
                size
            );
        }

        let (width, height) = match DimensionProbe::probe_bytes(&bytes, path) {
            Ok(dims) => dims,
            Err(e) => {
                tracing::warn!("{e}; recording 0x0");
                (0, 0)
            }
        };

        let hash = Hasher::content_hash_from_bytes(&bytes);
        drop(bytes);

        let mime_type = mime::mime_or_default(path).to_string();

        let name = path.file_name().ok_or_else(|| PipelineError::Extraction {
            path: path.to_path_buf(),
            message: "Path has no file name".to_string(),
        })?;
        let filename = match name.to_str() {
            Some(name) => name.to_string(),
            None => {
                let lossy = name.to_string_lossy().into_owned();
                tracing::warn!("{:?} is not valid UTF-8; recording it as {:?}", path, lossy);
                lossy
            }
        };

        tracing::trace!(
            "Extracted {:?} in {:?} ({}x{}, {} bytes)",
            filename,
            start.elapsed(),
            width,
            height,
            size
        );

        Ok(ImageRecord {
            url: format!("{}/{}", self.base_path, filename),
            original_name: filename.clone(),
            filename,
            width,
            height,
            path: self.base_path.clone(),
            size,
            mime_type,
            hash,
            uploaded_at: UploadedAt::now(),
            uploaded_by: self.uploader.clone(),
        })
    }
}
