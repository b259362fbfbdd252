//! The `imgscan scan` command.

mod batch;

use clap::{Args, ValueEnum};
use imgscan_core::pipeline::FileDiscovery;
use imgscan_core::{Cataloger, Config, OutputFormat as CoreOutputFormat};
use std::path::PathBuf;

use batch::run_batch;

/// Manifest formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

/// Arguments for the `scan` command.
///
/// Every option overrides the matching config file value when given.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Folder to scan (defaults to input.folder from the config)
    pub input: Option<PathBuf>,

    /// Manifest file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base path used for each record's `path` and `url`
    #[arg(long)]
    pub base_path: Option<String>,

    /// Uploader name stamped into every record
    #[arg(long, env = "IMGSCAN_UPLOADER_NAME")]
    pub uploader_name: Option<String>,

    /// Uploader email stamped into every record
    #[arg(long, env = "IMGSCAN_UPLOADER_EMAIL")]
    pub uploader_email: Option<String>,

    /// Uploader id stamped into every record
    #[arg(long, env = "IMGSCAN_UPLOADER_ID")]
    pub uploader_id: Option<String>,

    /// Number of files extracted concurrently
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Manifest format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write compact JSON instead of indented
    #[arg(long)]
    pub compact: bool,

    /// Keep raw filesystem order instead of sorting by name
    #[arg(long)]
    pub no_sort: bool,

    /// Do not descend into symlinked directories
    #[arg(long)]
    pub no_follow_links: bool,
}

/// Apply command-line overrides to the loaded configuration.
pub(crate) fn apply_overrides(config: &mut Config, args: &ScanArgs) {
    if let Some(input) = &args.input {
        config.input.folder = input.clone();
    }
    if let Some(output) = &args.output {
        config.input.output_file = output.clone();
    }
    if let Some(base_path) = &args.base_path {
        config.publish.base_path = base_path.clone();
    }
    if let Some(name) = &args.uploader_name {
        config.uploader.name = name.clone();
    }
    if let Some(email) = &args.uploader_email {
        config.uploader.email = email.clone();
    }
    if let Some(id) = &args.uploader_id {
        config.uploader.id = id.clone();
    }
    if let Some(parallel) = args.parallel {
        config.processing.parallel_workers = parallel;
    }
    if let Some(format) = args.format {
        config.output.format = format.to_string();
    }
    if args.compact {
        config.output.pretty = false;
    }
    if args.no_sort {
        config.processing.sort_entries = false;
    }
    if args.no_follow_links {
        config.processing.follow_links = false;
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Execute the scan command.
pub async fn execute(args: ScanArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let input = config.input_folder();
    let output = config.output_file();
    let format = CoreOutputFormat::parse(&config.output.format).unwrap_or(CoreOutputFormat::Json);

    tracing::info!("Image metadata scan starting");
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        base_path = %config.publish.base_path,
        "Configuration"
    );

    let cataloger = Cataloger::new(&config);
    tracing::debug!("Extracting with {} worker(s)", cataloger.parallel_workers());
    let files = cataloger.discover(&input)?;
    tracing::info!(
        "Found {} image file(s), {:.1} MB",
        files.len(),
        FileDiscovery::total_size(&files) as f64 / 1_000_000.0
    );

    let catalog = run_batch(&cataloger, files).await;

    imgscan_core::write_manifest(&output, &catalog.records, format, config.output.pretty)?;

    batch::print_summary(&catalog.stats, &output);
    batch::print_sample(&catalog.records)?;

    Ok(())
}
