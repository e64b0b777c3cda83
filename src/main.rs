//! Crawli main entry point
//!
//! This is the command-line interface for the Crawli target URL discoverer.

use anyhow::Context;
use clap::Parser;
use crawli::config::{load_config_with_hash, Config, CrawlTarget, OutputFormat};
use crawli::crawler::crawl;
use crawli::output::{print_statistics, write_report};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Crawli: a single-domain target URL discoverer
///
/// Crawli walks the internal links of one site breadth-first, starting from
/// a seed page, and collects every URL whose path matches the configured
/// target pattern. Press Ctrl-C to stop early; partial results are still
/// written.
#[derive(Parser, Debug)]
#[command(name = "crawli")]
#[command(version = "1.0.0")]
#[command(about = "A single-domain target URL discoverer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also append log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Override the seed URL
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Override the page budget
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Override the output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Override the output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.target.seed_url = Some(seed.clone());
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    cli.apply_overrides(&mut config);

    // Overrides may have broken an otherwise valid config
    let target = CrawlTarget::from_config(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config, &target);
        return Ok(());
    }

    handle_crawl(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Log lines go to stderr and, when `log_file` is given, are appended to
/// that file without ANSI colors.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawli=info,warn"),
            1 => EnvFilter::new("crawli=debug,info"),
            2 => EnvFilter::new("crawli=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Opens the log file for appending, creating it and its directory if needed
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Handles the --dry-run mode: shows the resolved crawl target
fn handle_dry_run(config: &Config, target: &CrawlTarget) {
    println!("=== Crawli Dry Run ===\n");

    println!("Target:");
    println!("  Base URL: {}", target.base_url);
    println!("  Seed URL: {}", target.seed_url);
    println!("  Target pattern: {}", target.target_pattern);
    println!("  Ignore patterns ({}):", target.ignore_patterns.len());
    for pattern in &target.ignore_patterns {
        println!("    - {}", pattern);
    }

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", target.max_pages);
    println!("  Request delay: {:?}", target.request_delay);
    println!("  Fetch timeout: {:?}", target.fetch_timeout);
    println!("  Attempts per URL: {}", target.retry.attempts());
    println!(
        "  Backoff: {:?} doubling, clamped to {:?}..{:?}",
        target.retry.multiplier, target.retry.min_backoff, target.retry.max_backoff
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Format: {:?}", config.output.format);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing with partial results");
            signal_token.cancel();
        }
    });

    let report = crawl(config, cancel).await.context("Crawl failed")?;

    write_report(&report, &config.output)
        .with_context(|| format!("Failed to write results to {}", config.output.path))?;
    tracing::info!("Results written to {}", config.output.path);

    if !quiet {
        println!();
        print_statistics(&report);
    }

    Ok(())
}
