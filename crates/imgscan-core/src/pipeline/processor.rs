//! Pipeline orchestration - discovery followed by per-file extraction.

use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, Result};
use crate::types::{ImageRecord, Progress, ScanStats};

use super::discovery::{DiscoveredFile, FileDiscovery};
use super::extract::MetadataExtractor;

/// The outcome of a catalog run.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Successful records, in discovery order
    pub records: Vec<ImageRecord>,
    pub stats: ScanStats,
}

/// Runs discovery and extraction over a folder.
pub struct Cataloger {
    discovery: FileDiscovery,
    extractor: Arc<MetadataExtractor>,
    parallel_workers: usize,
}

impl Cataloger {
    /// Create a cataloger with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            discovery: FileDiscovery::new(config.processing.clone()),
            extractor: Arc::new(MetadataExtractor::new(config)),
            parallel_workers: config.processing.parallel_workers.max(1),
        }
    }

    /// Discover all image files under `root`.
    pub fn discover(&self, root: &Path) -> Result<Vec<DiscoveredFile>> {
        Ok(self.discovery.discover(root)?)
    }

    /// Discover and extract everything under `root`.
    ///
    /// Only a missing root aborts the run. Files that fail extraction are
    /// logged and left out; the remaining records keep discovery order.
    pub async fn run<F>(&self, root: &Path, on_progress: F) -> Result<Catalog>
    where
        F: FnMut(Progress, Option<&ImageRecord>),
    {
        tracing::info!("Starting to process folder: {:?}", root);
        let files = self.discover(root)?;
        tracing::info!("Found {} image file(s)", files.len());
        Ok(self.run_files(files, on_progress).await)
    }

    /// Extract records for an already-discovered list of files.
    ///
    /// `on_progress` is called once per file, in discovery order, with the
    /// record when one was produced.
    pub async fn run_files<F>(&self, files: Vec<DiscoveredFile>, mut on_progress: F) -> Catalog
    where
        F: FnMut(Progress, Option<&ImageRecord>),
    {
        let total = files.len();
        let start = std::time::Instant::now();
        let mut records = Vec::with_capacity(total);
        let mut stats = ScanStats {
            discovered: total,
            ..ScanStats::default()
        };

        let mut handle = |processed: usize,
                          path: &Path,
                          outcome: PipelineResult<ImageRecord>| {
            let record = match outcome {
                Ok(record) => {
                    stats.succeeded += 1;
                    stats.total_bytes += record.size;
                    Some(record)
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::error!("Failed: {:?} - {}", path, e);
                    None
                }
            };

            let progress = Progress { processed, total };
            tracing::debug!(
                "Progress: {}/{} ({}%)",
                progress.processed,
                progress.total,
                progress.percent()
            );
            on_progress(progress, record.as_ref());
            if let Some(record) = record {
                records.push(record);
            }
        };

        if self.parallel_workers == 1 {
            for (i, file) in files.into_iter().enumerate() {
                let (path, outcome) =
                    extract_blocking(Arc::clone(&self.extractor), file.path).await;
                handle(i + 1, &path, outcome);
            }
        } else {
            // `buffered` yields in input order no matter which file finishes first.
            let mut outcomes = stream::iter(
                files
                    .into_iter()
                    .map(|file| extract_blocking(Arc::clone(&self.extractor), file.path)),
            )
            .buffered(self.parallel_workers);

            let mut processed = 0;
            while let Some((path, outcome)) = outcomes.next().await {
                processed += 1;
                handle(processed, &path, outcome);
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        stats.elapsed_seconds = elapsed;
        stats.images_per_second = if elapsed > 0.0 {
            stats.succeeded as f64 / elapsed
        } else {
            0.0
        };

        tracing::info!(
            "Processing completed. {} image(s) processed successfully.",
            stats.succeeded
        );
        Catalog { records, stats }
    }

    /// Number of files extracted concurrently.
    pub fn parallel_workers(&self) -> usize {
        self.parallel_workers
    }
}

/// Run one extraction on tokio's blocking pool.
async fn extract_blocking(
    extractor: Arc<MetadataExtractor>,
    path: PathBuf,
) -> (PathBuf, PipelineResult<ImageRecord>) {
    let task_path = path.clone();
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&task_path))
        .await
        .unwrap_or_else(|e| {
            Err(PipelineError::Extraction {
                path: path.clone(),
                message: format!("Task join error: {}", e),
            })
        });
    (path, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ScanError};
    use image::{ImageBuffer, ImageFormat, Rgb};

    fn write_image(path: &Path, width: u32, height: u32) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
        let format = ImageFormat::from_path(path).unwrap();
        img.save_with_format(path, format).unwrap();
    }

    fn config_with_workers(workers: usize) -> Config {
        let mut config = Config::default();
        config.processing.parallel_workers = workers;
        config.publish.base_path = "/uploads/base".to_string();
        config
    }

    #[tokio::test]
    async fn test_single_image_and_text_file() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 100, 50);
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let cataloger = Cataloger::new(&config_with_workers(1));
        let catalog = cataloger.run(dir.path(), |_, _| {}).await.unwrap();

        assert_eq!(catalog.records.len(), 1);
        let record = &catalog.records[0];
        assert_eq!(record.filename, "a.jpg");
        assert_eq!((record.width, record.height), (100, 50));
        assert_eq!(record.mime_type, "image/jpeg");
        assert_eq!(record.url, "/uploads/base/a.jpg");
        assert_eq!(catalog.stats.succeeded, 1);
        assert_eq!(catalog.stats.failed, 0);
    }

    #[tokio::test]
    async fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let cataloger = Cataloger::new(&Config::default());
        let catalog = cataloger.run(dir.path(), |_, _| {}).await.unwrap();
        assert!(catalog.records.is_empty());
        assert_eq!(catalog.stats.discovered, 0);
    }

    #[tokio::test]
    async fn test_missing_folder_is_configuration_error() {
        let cataloger = Cataloger::new(&Config::default());
        let err = cataloger
            .run(Path::new("/no/such/folder"), |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Config(ConfigError::InputNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_file_deleted_after_discovery() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1.png", "2.png", "3.png"] {
            write_image(&dir.path().join(name), 4, 4);
        }

        let cataloger = Cataloger::new(&Config::default());
        let files = cataloger.discover(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        std::fs::remove_file(dir.path().join("2.png")).unwrap();

        let mut seen = Vec::new();
        let catalog = cataloger
            .run_files(files, |p, r| seen.push((p.processed, r.is_some())))
            .await;

        assert_eq!(catalog.records.len(), 2);
        assert_eq!(catalog.records[0].filename, "1.png");
        assert_eq!(catalog.records[1].filename, "3.png");
        assert_eq!(catalog.stats.failed, 1);
        assert_eq!(seen, vec![(1, true), (2, false), (3, true)]);
    }

    #[tokio::test]
    async fn test_corrupt_image_kept_with_zero_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("good.png"), 3, 2);
        std::fs::write(dir.path().join("bad.jpg"), b"\x00\x01\x02 nope").unwrap();

        let catalog = Cataloger::new(&Config::default())
            .run(dir.path(), |_, _| {})
            .await
            .unwrap();

        assert_eq!(catalog.records.len(), 2);
        let bad = &catalog.records[0];
        assert_eq!(bad.filename, "bad.jpg");
        assert_eq!((bad.width, bad.height), (0, 0));
        assert_eq!(bad.size, 8);
        assert_eq!(bad.hash.len(), 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_parallel_matches_sequential_order() {
        let dir = tempfile::tempdir().unwrap();
        for (i, sub) in ["a", "b", "c"].iter().enumerate() {
            for j in 0..4 {
                let size = 8 + (i * 4 + j) as u32;
                write_image(&dir.path().join(sub).join(format!("{j}.png")), size, size);
            }
        }
        std::fs::write(dir.path().join("b/skip.txt"), "x").unwrap();

        let sequential = Cataloger::new(&config_with_workers(1))
            .run(dir.path(), |_, _| {})
            .await
            .unwrap();
        let parallel = Cataloger::new(&config_with_workers(4))
            .run(dir.path(), |_, _| {})
            .await
            .unwrap();

        assert_eq!(sequential.records.len(), 12);
        let key = |c: &Catalog| {
            c.records
                .iter()
                .map(|r| (r.hash.clone(), r.size, r.width, r.height))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&sequential), key(&parallel));
    }

    #[tokio::test]
    async fn test_progress_reaches_total() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("x/1.png"), 2, 2);
        write_image(&dir.path().join("y/2.png"), 2, 2);

        let mut last = None;
        Cataloger::new(&Config::default())
            .run(dir.path(), |p, _| last = Some(p))
            .await
            .unwrap();

        let last = last.unwrap();
        assert_eq!((last.processed, last.total), (2, 2));
        assert_eq!(last.percent(), 100);
    }

    #[tokio::test]
    async fn test_sequential_run_leaves_executor_free() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempfile::tempdir().unwrap();
        for name in ["1.png", "2.png", "3.png"] {
            write_image(&dir.path().join(name), 8, 8);
        }

        // Single-threaded runtime: the ticker only advances while extraction
        // is off the executor thread.
        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = Arc::clone(&ticks);
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::Relaxed);
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut observed = Vec::new();
        let catalog = Cataloger::new(&config_with_workers(1))
            .run(dir.path(), |_, _| observed.push(ticks.load(Ordering::Relaxed)))
            .await
            .unwrap();
        ticker.abort();

        assert_eq!(catalog.records.len(), 3);
        assert_eq!(observed.len(), 3);
        assert!(observed[0] > 0);
    }

    #[test]
    fn test_zero_workers_treated_as_sequential() {
        let cataloger = Cataloger::new(&config_with_workers(0));
        assert_eq!(cataloger.parallel_workers(), 1);
    }
}
