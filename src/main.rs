//! Storefront-Probe main entry point
//!
//! This is the command-line host for the storefront batch prober. It plays
//! the part of the delivery transport: it gathers target URLs, runs a batch,
//! and hands the rendered chunks or artifacts to the user.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use storefront_probe::batch::{check_urls, MAX_BATCH_URLS};
use storefront_probe::config::{resolve_config, Config, ConfigSource};
use storefront_probe::report::{print_statistics, Report};
use storefront_probe::url::{extract_urls, parse_url_list};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Storefront-Probe: checks sites for a public product catalog
///
/// Each target is probed at `<url>/products.json`; sites that return
/// products are reported as storefronts along with a few sample prices.
#[derive(Parser, Debug)]
#[command(name = "storefront-probe")]
#[command(version)]
#[command(about = "Checks sites for a public product catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single site
    Check {
        /// The site URL
        url: String,
    },

    /// Check a batch of sites (up to 2000)
    ///
    /// URLs come from a line-delimited file, from inline text, or from
    /// stdin. File input produces TXT + CSV artifacts unless --inline is set.
    Batch {
        /// Line-delimited file of URLs
        #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Free text to scan for http(s) URLs
        #[arg(short, long)]
        text: Option<String>,

        /// Print chunks to stdout even for file input
        #[arg(long)]
        inline: bool,

        /// Directory for TXT/CSV artifacts (overrides the config)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Validate the configuration and print the effective settings
    ValidateConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, source) = resolve_config(cli.config.as_deref())
        .with_context(|| format!("Failed to load configuration from {}", config_origin(&cli)))?;
    match source.hash() {
        Some(hash) => tracing::info!("Configuration loaded from {} (hash: {})", source, hash),
        None => tracing::debug!("No configuration file given, using defaults"),
    }

    match cli.command {
        Command::Check { url } => handle_check(&config, url, cli.quiet).await,
        Command::Batch {
            file,
            text,
            inline,
            output_dir,
        } => handle_batch(&config, file, text, inline, output_dir, cli.quiet).await,
        Command::ValidateConfig => {
            print!("{}", config_summary(&config, &source));
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only report output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("storefront_probe=info,warn"),
            1 => EnvFilter::new("storefront_probe=debug,info"),
            2 => EnvFilter::new("storefront_probe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn config_origin(cli: &Cli) -> String {
    cli.config
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
}

/// Renders the `validate-config` report for an already validated config
fn config_summary(config: &Config, source: &ConfigSource) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Storefront-Probe Configuration ===\n");

    let _ = writeln!(out, "Source: {}", source);
    let _ = writeln!(out, "Hash: {}", source.hash().unwrap_or("(defaults, no file)"));

    let _ = writeln!(out, "\nProbe:");
    let _ = writeln!(out, "  Sample limit: {}", config.probe.sample_limit);
    let _ = writeln!(out, "  Timeout: {}s", config.probe.timeout_secs);
    let _ = writeln!(out, "  Concurrency limit: {}", config.probe.concurrency_limit);

    let _ = writeln!(out, "\nUser Agent:");
    let _ = writeln!(out, "  {}", config.user_agent.header_value());

    let _ = writeln!(out, "\nReport:");
    let _ = writeln!(out, "  Chunk budget: {} characters", config.report.chunk_budget);
    let _ = writeln!(out, "  Output directory: {}", config.report.output_dir.display());

    let _ = writeln!(out, "\n✓ Configuration is valid");
    out
}

/// Handles `check`: probes one site and prints its block
async fn handle_check(config: &Config, url: String, quiet: bool) -> anyhow::Result<()> {
    let report = run_and_render(config, vec![url], quiet).await?;
    print_chunks(&report, config.report.chunk_budget);
    Ok(())
}

/// Handles `batch`: gathers targets, probes them, and delivers the report
async fn handle_batch(
    config: &Config,
    file: Option<PathBuf>,
    text: Option<String>,
    inline: bool,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    let from_file = file.is_some();
    let urls = if let Some(path) = file {
        let content = std::fs::read(&path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        parse_url_list(&content)
    } else if let Some(text) = text {
        extract_urls(&text)
    } else {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("Failed to read URLs from stdin")?;
        extract_urls(&input)
    };

    let report = run_and_render(config, urls, quiet).await?;

    if from_file && !inline {
        let dir = output_dir.unwrap_or_else(|| config.report.output_dir.clone());
        let paths = report
            .artifacts()?
            .write_to(&dir)
            .with_context(|| format!("Failed to write artifacts under {}", dir.display()))?;
        println!("Results in TXT file: {}", paths.text.display());
        println!("Results in CSV file: {}", paths.csv.display());
    } else {
        print_chunks(&report, config.report.chunk_budget);
    }

    Ok(())
}

/// Runs one batch, cancelling it on Ctrl-C, and returns its report
async fn run_and_render(
    config: &Config,
    urls: Vec<String>,
    quiet: bool,
) -> anyhow::Result<Report> {
    if !quiet && !urls.is_empty() {
        eprintln!("Checking {} URL(s)…", urls.len().min(MAX_BATCH_URLS));
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling batch");
            interrupt.cancel();
        }
    });

    let result = check_urls(config, urls, &cancel).await;
    watcher.abort();
    let run = result?;

    if !quiet {
        print_statistics(&run.statistics);
    }

    Ok(run.report)
}

/// Prints each chunk as a separate message
fn print_chunks(report: &Report, budget: usize) {
    for (i, chunk) in report.chunks(budget).iter().enumerate() {
        if i > 0 {
            println!("\n-----\n");
        }
        println!("{}", chunk.text());
    }
}
