//! Vectara-Ingest: a one-shot ingestion driver
//!
//! This crate loads a crawler implementation from an explicit registry, authenticates
//! against the Vectara indexing service, optionally resets the destination corpus, and
//! runs a single crawl pass.

pub mod cli;
pub mod config;
pub mod crawler;
pub mod ingest;
pub mod vectara;

use thiserror::Error;

/// Main error type for Vectara-Ingest operations
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] crawler::PluginError),

    #[error("Authentication error: {0}")]
    Auth(#[from] vectara::AuthError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to construct {class}: {error:#}")]
    Construct { class: String, error: anyhow::Error },

    #[error("Crawl of type {crawler_type} failed: {error:#}")]
    Crawl {
        crawler_type: String,
        error: anyhow::Error,
    },

    #[error("Crawl of type {crawler_type} did not finish within {seconds}s")]
    CrawlTimeout { crawler_type: String, seconds: u64 },
}

impl IngestError {
    /// Process exit status for this failure
    ///
    /// Each failure class maps to its own code so callers can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            IngestError::Config(_) => 2,
            IngestError::Plugin(_) => 3,
            IngestError::Auth(_) => 4,
            IngestError::Http { .. } => 5,
            IngestError::Construct { .. } | IngestError::Crawl { .. } => 6,
            IngestError::CrawlTimeout { .. } => 7,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid [{section}] section: {message}")]
    Section { section: String, message: String },
}

/// Result type alias for Vectara-Ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, EnvSettings};
pub use crawler::{Crawler, CrawlerContext, CrawlerRegistry};
pub use ingest::{run, RunReport};
