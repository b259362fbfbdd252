//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::error::{ConfigError, PipelineError};

use super::mime;

/// Discovers image files in directories.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Discover all image files under `root`.
    ///
    /// A missing root is fatal. If `root` is a file, it is returned when its
    /// extension is an image type. Directories are walked depth-first; an
    /// unreadable subdirectory is logged and contributes nothing, while its
    /// siblings are still visited. A symlink to an image file is always kept;
    /// symlinked directories are only entered when `follow_links` is set.
    pub fn discover(&self, root: &Path) -> Result<Vec<DiscoveredFile>, ConfigError> {
        if !root.exists() {
            return Err(ConfigError::InputNotFound(root.to_path_buf()));
        }

        if root.is_file() {
            if mime::is_image(root) {
                if let Ok(meta) = std::fs::metadata(root) {
                    return Ok(vec![DiscoveredFile {
                        path: root.to_path_buf(),
                        size: meta.len(),
                    }]);
                }
            }
            return Ok(vec![]);
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_links);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let err = PipelineError::SubtreeRead {
                        path: e.path().unwrap_or(root).to_path_buf(),
                        message: e.to_string(),
                    };
                    tracing::warn!("{err}");
                    continue;
                }
            };

            // `Path::is_file` resolves links, `file_type` does not when not following.
            if !entry.path().is_file() || !mime::is_image(entry.path()) {
                continue;
            }

            match std::fs::metadata(entry.path()) {
                Ok(meta) => files.push(DiscoveredFile {
                    path: entry.into_path(),
                    size: meta.len(),
                }),
                Err(e) => tracing::warn!("Skipping {:?}: {}", entry.path(), e),
            }
        }

        tracing::debug!("Discovered {} image file(s) under {:?}", files.len(), root);
        Ok(files)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}
