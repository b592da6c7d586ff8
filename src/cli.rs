//! Process entry point shared by every ingest binary
//!
//! The stock `vectara-ingest` binary ships with an empty registry. A connector binary
//! builds its own [`CrawlerRegistry`] and hands it to [`main_with`].

use crate::config::EnvSettings;
use crate::crawler::CrawlerRegistry;
use crate::ingest::run;
use crate::vectara::build_http_client;
use clap::Parser;
use reqwest::Client;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Vectara-Ingest: crawl a source once and index it into a Vectara corpus
#[derive(Parser, Debug)]
#[command(name = "vectara-ingest")]
#[command(version)]
#[command(about = "Run a one-shot ingestion crawl into Vectara", long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Parses the command line, sets up logging, and runs one ingest with `registry`
///
/// # Example
///
/// ```no_run
/// use std::process::ExitCode;
/// use vectara_ingest::CrawlerRegistry;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> ExitCode {
///     let mut registry = CrawlerRegistry::default();
///     // registry.register_crawler("website", |ctx| ...);
///     vectara_ingest::cli::main_with(&registry).await
/// }
/// ```
pub async fn main_with(registry: &CrawlerRegistry) -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let client = match build_http_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(execute(&EnvSettings::from_env(), registry, &client).await)
}

/// Runs one ingest and returns the process exit status
///
/// `0` on success, otherwise [`crate::IngestError::exit_code`].
pub async fn execute(env: &EnvSettings, registry: &CrawlerRegistry, client: &Client) -> u8 {
    match run(env, registry, client).await {
        Ok(report) => {
            tracing::info!(
                "Ingest completed: {} ran for {}s",
                report.class,
                report.crawl_duration().num_seconds()
            );
            0
        }
        Err(e) => {
            tracing::error!("{}", e);
            e.exit_code()
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vectara_ingest=info,warn"),
            1 => EnvFilter::new("vectara_ingest=debug,info"),
            2 => EnvFilter::new("vectara_ingest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
