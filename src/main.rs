//! Brandsift main entry point
//!
//! This is the command-line interface for the Brandsift asset harvester.

use brandsift::config::{load_config, Config};
use brandsift::crawler::{Coordinator, CrawlTarget};
use brandsift::progress::ProgressReporter;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Brandsift: a brand asset harvester
///
/// Brandsift crawls a website one level deep, collects its image assets and
/// typography, and stores quality-filtered copies in a per-site directory.
#[derive(Parser, Debug)]
#[command(name = "brandsift")]
#[command(version)]
#[command(about = "Harvest a website's visual assets and typography", long_about = None)]
struct Cli {
    /// Start URL of the site to harvest
    #[arg(value_name = "URL")]
    start_url: String,

    /// Maximum number of pages to scan, homepage included
    #[arg(long, default_value_t = 15)]
    max_pages: usize,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the download root directory
    #[arg(long, value_name = "DIR")]
    download_root: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, fall back to defaults without a file
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    config.crawler.max_pages = cli.max_pages;
    if let Some(root) = cli.download_root {
        config.downloader.download_root = root;
    }

    let target = CrawlTarget::new(&cli.start_url, config.crawler.max_pages)?;
    tracing::info!(
        "Harvesting {} (max {} pages)",
        target.domain,
        target.max_pages
    );

    let quiet = cli.quiet;
    let progress = ProgressReporter::new(move |message| {
        if !quiet {
            println!("{}", message);
        }
    });

    let coordinator = Coordinator::new(target, config, progress)?;
    let (assets, fonts) = match coordinator.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    println!("\n=== Harvest Summary ===");
    println!("Header font: {}", fonts.headers);
    println!("Body font:   {}", fonts.body);
    println!("Assets retained: {}", assets.len());
    for asset in &assets {
        println!(
            "  {} ({}x{}, {} bytes)",
            asset.path.display(),
            asset.pixel_width,
            asset.pixel_height,
            asset.byte_size
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("brandsift=info,warn"),
            1 => EnvFilter::new("brandsift=debug,info"),
            2 => EnvFilter::new("brandsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
