use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::ConfigError;

/// Default Vectara API host
pub const DEFAULT_ENDPOINT: &str = "api.vectara.io";

/// Default wait after a corpus reset, in seconds
pub const DEFAULT_RESET_SETTLE_SECS: u64 = 5;

/// Main configuration structure for Vectara-Ingest
///
/// Any top-level table other than `vectara` and `crawling` is kept as a
/// crawler-specific section.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub vectara: VectaraConfig,
    pub crawling: CrawlingConfig,
    #[serde(flatten)]
    pub sections: toml::Table,
}

impl Config {
    /// Returns a crawler-specific section as a raw table
    pub fn section(&self, name: &str) -> Option<&toml::Table> {
        self.sections.get(name).and_then(toml::Value::as_table)
    }

    /// Deserializes a crawler-specific section into a typed settings struct
    pub fn section_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        let table = self.section(name).ok_or_else(|| ConfigError::Section {
            section: name.to_string(),
            message: "section is missing".to_string(),
        })?;

        toml::Value::Table(table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Section {
                section: name.to_string(),
                message: e.to_string(),
            })
    }
}

/// Destination (Vectara) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VectaraConfig {
    /// API host, without scheme
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; always replaced by `VECTARA_API_KEY`
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,

    /// Customer account id; always replaced by `VECTARA_CUSTOMER_ID`
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: Option<String>,

    /// Corpus id; always replaced by `VECTARA_CORPUS_ID`
    #[serde(default, deserialize_with = "lenient_u64")]
    pub corpus_id: Option<u64>,

    /// OAuth2 server base URL, used by corpus reset
    #[serde(default)]
    pub auth_url: Option<String>,

    /// OAuth2 app client id
    #[serde(default)]
    pub auth_id: Option<String>,

    /// OAuth2 app client secret
    #[serde(default)]
    pub auth_secret: Option<String>,

    /// Delete every document in the corpus before crawling. Irreversible.
    #[serde(default)]
    pub reset_corpus: bool,

    /// Seconds to wait after a reset before crawling
    #[serde(default = "default_reset_settle_secs")]
    pub reset_settle_secs: u64,

    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Crawl selection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlingConfig {
    /// Logical crawler type, e.g. "website"
    pub crawler_type: String,

    /// Upper bound on the crawl, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_reset_settle_secs() -> u64 {
    DEFAULT_RESET_SETTLE_SECS
}

/// Reads a file-side identity value that the environment will overwrite
///
/// Strings and integers are kept as text; anything else is dropped instead of
/// failing the load.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<toml::Value>::deserialize(deserializer)? {
        Some(toml::Value::String(s)) => Some(s),
        Some(toml::Value::Integer(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Like [`lenient_string`], for ids that must be unsigned integers
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<toml::Value>::deserialize(deserializer)? {
        Some(toml::Value::Integer(n)) => u64::try_from(n).ok(),
        Some(toml::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
