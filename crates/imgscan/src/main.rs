//! imgscan CLI - catalog a folder of images into a JSON metadata manifest.
//!
//! Every image under the input folder becomes one record with its dimensions,
//! size, SHA-256 hash, MIME type and published URL. The manifest is meant for
//! import into a downstream metadata store.
//!
//! # Usage
//!
//! ```bash
//! # Scan the configured input folder
//! imgscan scan
//!
//! # Scan a specific folder and write the manifest elsewhere
//! imgscan scan ./uploads --output out/manifest.json --base-path /uploads/main
//!
//! # View configuration
//! imgscan config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// imgscan - catalog a folder of images into a JSON metadata manifest.
#[derive(Parser, Debug)]
#[command(name = "imgscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a folder and write the image metadata manifest
    Scan(cli::scan::ScanArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match imgscan_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `imgscan config path`."
            );
            imgscan_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("imgscan v{}", imgscan_core::VERSION);

    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
