//! Crawler plugins
//!
//! This module defines the capability every crawler implementation must provide and
//! the registry that turns a configured crawler type into a live instance:
//! - `Crawler`: the single "run a crawl" entry point
//! - `CrawlerContext`: the constructor arguments handed to every implementation
//! - `naming`: crawler type → module path / class name derivation
//! - `CrawlerRegistry`: explicit lookup table replacing dynamic module loading

mod naming;
mod registry;

pub use naming::{capitalize, PluginPath, CLASS_SUFFIX, MODULE_SUFFIX};
pub use registry::{CrawlerFactory, CrawlerRegistry, Export, DEFAULT_SEARCH_LOCATION};

use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Name of the capability every crawler export must satisfy
pub const CRAWLER_CAPABILITY: &str = "Crawler";

/// Errors raised while resolving a crawler type
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("No crawler registered at {path} (registered types: {available:?})")]
    NotFound { path: String, available: Vec<String> },

    #[error("{found} is not a {required}")]
    TypeMismatch { found: String, required: String },
}

/// A pluggable component that performs one complete ingestion pass
///
/// The call is all-or-nothing from the driver's point of view: pagination,
/// retries and per-document errors are the implementation's business.
#[async_trait]
pub trait Crawler: Send {
    /// Runs the crawl to completion
    async fn crawl(&mut self) -> anyhow::Result<()>;
}

/// Constructor arguments passed to every crawler
#[derive(Clone)]
pub struct CrawlerContext {
    /// Merged, read-only configuration
    pub config: Arc<Config>,
    /// Vectara API host
    pub endpoint: String,
    /// Vectara customer account id
    pub customer_id: String,
    /// Vectara corpus id
    pub corpus_id: u64,
    /// Vectara API key used for indexing
    pub api_key: String,
}

impl std::fmt::Debug for CrawlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlerContext")
            .field("endpoint", &self.endpoint)
            .field("customer_id", &self.customer_id)
            .field("corpus_id", &self.corpus_id)
            .field("crawler_type", &self.config.crawling.crawler_type)
            .finish_non_exhaustive()
    }
}
