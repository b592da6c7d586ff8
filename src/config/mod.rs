//! Configuration module for Vectara-Ingest
//!
//! This module handles loading and validating the TOML configuration document and
//! overlaying the identifiers that come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use vectara_ingest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/website.toml")).unwrap();
//! println!("Crawler type: {}", config.crawling.crawler_type);
//! ```

mod env;
mod parser;
mod types;
mod validation;

// Re-export types
pub use env::{EnvSettings, RunEnv};
pub use types::{Config, CrawlingConfig, VectaraConfig, DEFAULT_ENDPOINT, DEFAULT_RESET_SETTLE_SECS};

// Re-export parser and validation functions
pub use parser::{load_config, load_config_with_hash};
pub use validation::validate;
