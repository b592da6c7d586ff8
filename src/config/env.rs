//! Environment-sourced settings
//!
//! Secrets and destination identifiers never live in the config document; they come
//! from the environment and always win over anything the document says.

use crate::config::types::Config;
use crate::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "CONFIG_FILE";
pub const PROFILE: &str = "PROFILE";
pub const VECTARA_API_KEY: &str = "VECTARA_API_KEY";
pub const VECTARA_CUSTOMER_ID: &str = "VECTARA_CUSTOMER_ID";
pub const VECTARA_CORPUS_ID: &str = "VECTARA_CORPUS_ID";

/// Variables read by [`EnvSettings::from_env`], in the order they are checked
const REQUIRED: [&str; 5] = [
    CONFIG_FILE,
    PROFILE,
    VECTARA_API_KEY,
    VECTARA_CUSTOMER_ID,
    VECTARA_CORPUS_ID,
];

/// Raw snapshot of the environment variables the driver reads
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    values: HashMap<&'static str, String>,
}

impl EnvSettings {
    /// Snapshots the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a snapshot from an arbitrary lookup function
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = REQUIRED
            .iter()
            .filter_map(|&name| {
                lookup(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (name, value))
            })
            .collect();

        Self { values }
    }

    /// Builds a snapshot from fixed pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: HashMap<&str, &str> = pairs.into_iter().collect();
        Self::from_lookup(|name| map.get(name).map(|value| value.to_string()))
    }

    /// Returns the raw value of a variable, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Checks that every required variable is present and well-formed
    ///
    /// Nothing is read from disk or the network here; a run that fails this
    /// check stops before any side effect.
    pub fn require(&self) -> Result<RunEnv, ConfigError> {
        for name in REQUIRED {
            if self.get(name).is_none() {
                return Err(ConfigError::MissingEnv(name));
            }
        }

        let raw_corpus_id = self.value(VECTARA_CORPUS_ID)?;
        let corpus_id = raw_corpus_id
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnv {
                name: VECTARA_CORPUS_ID,
                value: raw_corpus_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(RunEnv {
            config_file: PathBuf::from(self.value(CONFIG_FILE)?),
            profile: self.value(PROFILE)?.to_string(),
            api_key: self.value(VECTARA_API_KEY)?.to_string(),
            customer_id: self.value(VECTARA_CUSTOMER_ID)?.to_string(),
            corpus_id,
        })
    }

    fn value(&self, name: &'static str) -> Result<&str, ConfigError> {
        self.get(name).ok_or(ConfigError::MissingEnv(name))
    }
}

/// Validated environment for one run
#[derive(Clone)]
pub struct RunEnv {
    pub config_file: PathBuf,
    pub profile: String,
    pub api_key: String,
    pub customer_id: String,
    pub corpus_id: u64,
}

impl RunEnv {
    /// Overlays the environment identifiers onto a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        config.vectara.api_key = Some(self.api_key.clone());
        config.vectara.customer_id = Some(self.customer_id.clone());
        config.vectara.corpus_id = Some(self.corpus_id);
    }

    /// First characters of the API key, safe to log
    pub fn redacted_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(5).collect();
        format!("{}...", prefix)
    }
}

impl std::fmt::Debug for RunEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunEnv")
            .field("config_file", &self.config_file)
            .field("profile", &self.profile)
            .field("api_key", &self.redacted_api_key())
            .field("customer_id", &self.customer_id)
            .field("corpus_id", &self.corpus_id)
            .finish()
    }
}
