//! The run sequence

use crate::config::{load_config_with_hash, validate, Config, EnvSettings, RunEnv};
use crate::crawler::{capitalize, CrawlerContext, CrawlerRegistry, CLASS_SUFFIX};
use crate::vectara::{reset_corpus, OAuthCredentials, ResetOutcome};
use crate::{ConfigError, IngestError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// How to wait for a corpus reset to finish on the service side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Block for a fixed interval
    Fixed(Duration),
}

impl SettlePolicy {
    /// Waits according to the policy
    pub async fn wait(&self) {
        match self {
            SettlePolicy::Fixed(delay) => {
                if !delay.is_zero() {
                    tracing::info!("Waiting {:?} for the corpus reset to settle", delay);
                    tokio::time::sleep(*delay).await;
                }
            }
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Configured crawler type
    pub crawler_type: String,
    /// Class the type resolved to
    pub class: String,
    /// Outcome of the corpus reset, if one was requested
    pub reset: Option<ResetOutcome>,
    /// When the crawl started
    pub started_at: DateTime<Utc>,
    /// When the crawl finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Wall-clock time spent in the crawl
    pub fn crawl_duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Runs one ingestion pass
///
/// Every required environment variable is checked before the config file is read and
/// before any HTTP request, so a misconfigured run has no side effects.
///
/// # Arguments
///
/// * `env` - Snapshot of the environment
/// * `registry` - Crawler implementations available to this process
/// * `client` - HTTP client used for the administrative calls
///
/// # Returns
///
/// * `Ok(RunReport)` - The crawl finished
/// * `Err(IngestError)` - The phase that failed, see [`IngestError::exit_code`]
pub async fn run(
    env: &EnvSettings,
    registry: &CrawlerRegistry,
    client: &Client,
) -> Result<RunReport, IngestError> {
    tracing::info!("Starting ingest");

    let run_env = env.require()?;
    tracing::info!("Config file: {}", run_env.config_file.display());
    tracing::info!("Profile name: {}", run_env.profile);

    let config = Arc::new(load_merged_config(&run_env)?);

    let endpoint = config.vectara.endpoint.clone();
    let crawler_type = config.crawling.crawler_type.clone();

    tracing::info!("Endpoint: {}", endpoint);
    tracing::info!("Customer ID: {}", run_env.customer_id);
    tracing::info!("Corpus ID: {}", run_env.corpus_id);
    tracing::info!("API Key: {}", run_env.redacted_api_key());
    tracing::info!("Crawler Type: {}", crawler_type);

    let class = format!("{}{}", capitalize(&crawler_type), CLASS_SUFFIX);
    let ctx = CrawlerContext {
        config: Arc::clone(&config),
        endpoint: endpoint.clone(),
        customer_id: run_env.customer_id.clone(),
        corpus_id: run_env.corpus_id,
        api_key: run_env.api_key.clone(),
    };

    let mut crawler = registry.resolve(&class, ctx)?;
    tracing::info!("Instantiated {}", class);

    let reset = if config.vectara.reset_corpus {
        Some(reset_before_crawl(client, &config, &run_env).await?)
    } else {
        None
    };

    tracing::info!("Starting crawl of type {}...", crawler_type);
    let started_at = Utc::now();

    let crawl = crawler.crawl();
    let result = match config.crawling.timeout_secs {
        Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), crawl)
            .await
            .map_err(|_| IngestError::CrawlTimeout {
                crawler_type: crawler_type.clone(),
                seconds,
            })?,
        None => crawl.await,
    };

    result.map_err(|error| IngestError::Crawl {
        crawler_type: crawler_type.clone(),
        error,
    })?;

    let finished_at = Utc::now();
    tracing::info!("Finished crawl of type {}...", crawler_type);

    Ok(RunReport {
        crawler_type,
        class,
        reset,
        started_at,
        finished_at,
    })
}

/// Loads the config document, overlays the environment identifiers, then validates
fn load_merged_config(run_env: &RunEnv) -> Result<Config, ConfigError> {
    let (mut config, hash) = load_config_with_hash(&run_env.config_file)?;
    tracing::info!("Loaded configuration (hash: {})", hash);

    run_env.apply(&mut config);
    tracing::info!("Updated configuration with environment variables");

    validate(&config)?;
    Ok(config)
}

/// Empties the corpus, then waits for the deletion to settle
async fn reset_before_crawl(
    client: &Client,
    config: &Config,
    run_env: &RunEnv,
) -> Result<ResetOutcome, IngestError> {
    let vectara = &config.vectara;

    // validation guarantees these when reset_corpus is on
    let credentials = match (&vectara.auth_url, &vectara.auth_id, &vectara.auth_secret) {
        (Some(auth_url), Some(client_id), Some(client_secret)) => OAuthCredentials {
            auth_url: auth_url.clone(),
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
        },
        _ => {
            return Err(ConfigError::Validation(
                "vectara.auth_url, auth_id and auth_secret are required to reset the corpus"
                    .to_string(),
            )
            .into())
        }
    };

    tracing::info!("Resetting corpus {}", run_env.corpus_id);
    let outcome = reset_corpus(
        client,
        &vectara.endpoint,
        &run_env.customer_id,
        run_env.corpus_id,
        &credentials,
    )
    .await?;

    SettlePolicy::Fixed(Duration::from_secs(vectara.reset_settle_secs))
        .wait()
        .await;

    Ok(outcome)
}
