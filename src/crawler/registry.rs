//! Crawler registry
//!
//! Maps module paths to their exports. Crawlers are registered explicitly at startup;
//! a configured type is resolved purely through the naming convention in `naming`.

use crate::crawler::naming::PluginPath;
use crate::crawler::{Crawler, CrawlerContext, PluginError, CRAWLER_CAPABILITY};
use crate::IngestError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default location crawler modules are registered under
pub const DEFAULT_SEARCH_LOCATION: &str = "crawlers";

/// Constructor for a crawler implementation
pub type CrawlerFactory =
    Arc<dyn Fn(CrawlerContext) -> anyhow::Result<Box<dyn Crawler>> + Send + Sync>;

/// An item exported by a crawler module
#[derive(Clone)]
pub enum Export {
    /// A constructor for something implementing [`Crawler`]
    Crawler(CrawlerFactory),
    /// Anything else a module exposes, described by its type name
    Item { type_name: String },
}

impl std::fmt::Debug for Export {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Export::Crawler(_) => f.write_str("Crawler(..)"),
            Export::Item { type_name } => write!(f, "Item({})", type_name),
        }
    }
}

/// Explicit registry of crawler modules
#[derive(Debug, Clone)]
pub struct CrawlerRegistry {
    search_location: String,
    modules: BTreeMap<String, BTreeMap<String, Export>>,
}

impl Default for CrawlerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_LOCATION)
    }
}

impl CrawlerRegistry {
    /// Creates an empty registry rooted at `search_location`
    pub fn new(search_location: impl Into<String>) -> Self {
        Self {
            search_location: search_location.into(),
            modules: BTreeMap::new(),
        }
    }

    /// Location every module path is rooted at
    pub fn search_location(&self) -> &str {
        &self.search_location
    }

    /// Registers a crawler for a logical type, e.g. `"website"`
    ///
    /// The module path and class name are derived from the type, so
    /// `register_crawler("website", ..)` lands at `crawlers/website_crawler::WebsiteCrawler`.
    /// Registering the same type again replaces the previous constructor.
    pub fn register_crawler<F>(&mut self, crawler_type: &str, factory: F) -> PluginPath
    where
        F: Fn(CrawlerContext) -> anyhow::Result<Box<dyn Crawler>> + Send + Sync + 'static,
    {
        let path = PluginPath::for_crawler_type(&self.search_location, crawler_type);
        self.insert(&path, Export::Crawler(Arc::new(factory)));
        path
    }

    /// Registers an arbitrary export under an explicit module path and name
    pub fn register_export(&mut self, module: &str, name: &str, export: Export) {
        let path = PluginPath {
            module: module.to_string(),
            class: name.to_string(),
        };
        self.insert(&path, export);
    }

    fn insert(&mut self, path: &PluginPath, export: Export) {
        let previous = self
            .modules
            .entry(path.module.clone())
            .or_default()
            .insert(path.class.clone(), export);

        if previous.is_some() {
            tracing::warn!("Replacing registered export {}", path);
        }
    }

    /// Crawler types that resolve to a crawler export, sorted
    pub fn crawler_types(&self) -> Vec<String> {
        self.modules
            .iter()
            .flat_map(|(module, exports)| {
                exports.iter().filter_map(move |(class, export)| match export {
                    Export::Crawler(_) => {
                        let stem = module.rsplit('/').next().unwrap_or(module);
                        let stem = stem.strip_suffix(super::MODULE_SUFFIX).unwrap_or(stem);
                        (PluginPath::for_crawler_type(&self.search_location, stem).class
                            == *class)
                            .then(|| stem.to_string())
                    }
                    Export::Item { .. } => None,
                })
            })
            .collect()
    }

    /// Looks up the export for an identifier without constructing anything
    ///
    /// # Errors
    ///
    /// * `PluginError::NotFound` - No module or no export at the derived path
    /// * `PluginError::TypeMismatch` - The export is not a crawler
    pub fn lookup(&self, identifier: &str) -> Result<(PluginPath, CrawlerFactory), PluginError> {
        let path = PluginPath::from_identifier(&self.search_location, identifier);

        let export = self
            .modules
            .get(&path.module)
            .and_then(|exports| exports.get(&path.class))
            .ok_or_else(|| PluginError::NotFound {
                path: path.to_string(),
                available: self.crawler_types(),
            })?;

        match export {
            Export::Crawler(factory) => Ok((path, Arc::clone(factory))),
            Export::Item { type_name } => Err(PluginError::TypeMismatch {
                found: format!("{} ({})", path, type_name),
                required: CRAWLER_CAPABILITY.to_string(),
            }),
        }
    }

    /// Resolves an identifier and constructs the crawler
    ///
    /// The constructor only runs after the lookup succeeds.
    pub fn resolve(
        &self,
        identifier: &str,
        ctx: CrawlerContext,
    ) -> Result<Box<dyn Crawler>, IngestError> {
        let (path, factory) = self.lookup(identifier)?;

        tracing::debug!("Constructing {}", path);

        factory(ctx).map_err(|error| IngestError::Construct {
            class: path.class,
            error,
        })
    }
}
