//! Header-only dimension probing.
//!
//! Only the image header is parsed; pixel data is never decoded, so probing
//! stays cheap on large batches.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Reads pixel dimensions from image headers.
pub struct DimensionProbe;

impl DimensionProbe {
    /// Probe width and height from an in-memory copy of the file.
    ///
    /// The format is detected from the content first and from the extension
    /// second. Unsupported or corrupt headers produce
    /// [`PipelineError::DimensionProbe`].
    pub fn probe_bytes(bytes: &[u8], path: &Path) -> PipelineResult<(u32, u32)> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::DimensionProbe {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        if reader.format().is_none() {
            let format =
                ImageFormat::from_path(path).map_err(|_| PipelineError::DimensionProbe {
                    path: path.to_path_buf(),
                    message: format!(
                        "Unsupported format: {}",
                        path.extension()
                            .and_then(|e| e.to_str())
                            .unwrap_or("unknown")
                    ),
                })?;
            reader.set_format(format);
        }

        reader
            .into_dimensions()
            .map_err(|e| PipelineError::DimensionProbe {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
