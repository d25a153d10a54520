//! Docs-Parser main entry point
//!
//! This is the command-line interface for the documentation extractor.

use clap::Parser;
use docs_parser::cache::ResponseCache;
use docs_parser::config::{load_config_with_hash, Config};
use docs_parser::extract::{run_mode, Mode};
use docs_parser::fetch::HttpFetcher;
use docs_parser::output::{control_output, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Docs-Parser: a Python documentation extractor
///
/// Docs-Parser pulls release notes, version listings and the PDF archive
/// from the Python documentation, and cross-checks PEP statuses against
/// the PEP index.
#[derive(Parser, Debug)]
#[command(name = "docs-parser")]
#[command(version = "1.0.0")]
#[command(about = "Python documentation parser", long_about = None)]
struct Cli {
    /// Extraction mode
    #[arg(value_enum, value_name = "MODE")]
    mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    clear_cache: bool,

    /// Output format for the results
    #[arg(short, long, value_enum, default_value_t = OutputMode::Plain)]
    output: OutputMode,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    tracing::info!("Parser started");
    tracing::info!(
        "Command line arguments: mode={}, clear_cache={}, output={:?}",
        cli.mode,
        cli.clear_cache,
        cli.output
    );

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Err(e) = handle_run(&cli, &config).await {
        tracing::error!("Run failed: {}", e);
        return Err(e);
    }

    tracing::info!("Parser finished");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_parser=info,warn"),
            1 => EnvFilter::new("docs_parser=debug,info"),
            2 => EnvFilter::new("docs_parser=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected mode and renders whatever it produced
async fn handle_run(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::from_config(config)?;
    if cli.clear_cache {
        fetcher.clear_cache()?;
    } else {
        tracing::info!(
            "Response cache {} holds {} pages",
            config.cache.database_path,
            fetcher.cache().count()?
        );
    }

    match run_mode(cli.mode, &fetcher, config).await? {
        Some(results) => {
            tracing::info!("{} produced {} rows", cli.mode, results.len());
            control_output(&results, cli.output, &config.output, cli.mode.name())?;
        }
        None => tracing::info!("{} produced nothing to render", cli.mode),
    }

    Ok(())
}
