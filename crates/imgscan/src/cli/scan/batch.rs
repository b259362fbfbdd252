//! Batch extraction with a progress bar, plus the end-of-run summary.

use std::path::Path;

use imgscan_core::{Catalog, Cataloger, DiscoveredFile, ImageRecord, ScanStats};

/// How many records are echoed to stdout after a run.
const SAMPLE_SIZE: usize = 2;

/// Extract every discovered file while driving a progress bar.
pub async fn run_batch(cataloger: &Cataloger, files: Vec<DiscoveredFile>) -> Catalog {
    let progress = create_progress_bar(files.len() as u64);
    let start = std::time::Instant::now();

    let catalog = cataloger
        .run_files(files, |p, _| {
            progress.set_position(p.processed as u64);
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                progress.set_message(format!("{:.1} img/sec", p.processed as f64 / elapsed));
            }
        })
        .await;

    progress.finish_and_clear();
    catalog
}

/// Create a progress bar for batch processing.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after a run.
pub fn print_summary(stats: &ScanStats, output: &Path) {
    for line in summary_lines(stats, output) {
        eprintln!("{line}");
    }
}

fn summary_lines(stats: &ScanStats, output: &Path) -> Vec<String> {
    let mb_processed = stats.total_bytes as f64 / 1_000_000.0;
    let throughput = if stats.elapsed_seconds > 0.0 {
        mb_processed / stats.elapsed_seconds
    } else {
        0.0
    };

    let mut lines = vec![
        String::new(),
        "  ====================================".to_string(),
        "               Summary".to_string(),
        "  ====================================".to_string(),
        format!("    Succeeded:    {:>8}", stats.succeeded),
    ];
    if stats.failed > 0 {
        lines.push(format!("    Failed:       {:>8}", stats.failed));
    }
    lines.extend([
        "  ------------------------------------".to_string(),
        format!("    Discovered:   {:>8}", stats.discovered),
        format!("    Duration:     {:>7.1}s", stats.elapsed_seconds),
        format!("    Rate:         {:>7.1} img/sec", stats.images_per_second),
        format!("    Throughput:   {:>7.1} MB/sec", throughput),
        format!("    Output:       {}", output.display()),
        "  ====================================".to_string(),
    ]);
    lines
}

/// Echo the first few records to stdout as pretty JSON.
pub fn print_sample(records: &[ImageRecord]) -> anyhow::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let sample = &records[..records.len().min(SAMPLE_SIZE)];
    println!("{}", imgscan_core::output::to_json(&sample, true)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_hides_failed_row_when_zero() {
        let stats = ScanStats {
            discovered: 3,
            succeeded: 3,
            ..ScanStats::default()
        };
        let lines = summary_lines(&stats, Path::new("out/manifest.json"));
        assert!(lines.iter().any(|l| l.contains("Succeeded:") && l.ends_with('3')));
        assert!(!lines.iter().any(|l| l.contains("Failed:")));
        assert!(lines.iter().any(|l| l.contains("out/manifest.json")));
    }

    #[test]
    fn summary_shows_failures() {
        let stats = ScanStats {
            discovered: 5,
            succeeded: 4,
            failed: 1,
            ..ScanStats::default()
        };
        let lines = summary_lines(&stats, Path::new("m.json"));
        assert!(lines.iter().any(|l| l.contains("Failed:") && l.ends_with('1')));
        assert!(lines.iter().any(|l| l.contains("Discovered:") && l.ends_with('5')));
    }

    #[tokio::test]
    async fn run_batch_collects_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"not really png").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"skip me").unwrap();

        let cataloger = Cataloger::new(&imgscan_core::Config::default());
        let files = cataloger.discover(dir.path()).unwrap();
        let catalog = run_batch(&cataloger, files).await;

        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.records[0].filename, "a.png");
        assert_eq!(catalog.records[0].width, 0);
    }
}
