use crate::config::types::{Config, CrawlingConfig, VectaraConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_vectara_config(&config.vectara)?;
    validate_crawling_config(&config.crawling)?;
    Ok(())
}

/// Validates destination settings
fn validate_vectara_config(config: &VectaraConfig) -> Result<(), ConfigError> {
    if config.endpoint.is_empty() {
        return Err(ConfigError::Validation(
            "vectara.endpoint cannot be empty".to_string(),
        ));
    }

    if config.endpoint.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "vectara.endpoint must not contain whitespace, got '{}'",
            config.endpoint
        )));
    }

    if config.reset_corpus {
        validate_reset_credentials(config)?;
    }

    Ok(())
}

/// Corpus reset needs a full set of OAuth2 client credentials
fn validate_reset_credentials(config: &VectaraConfig) -> Result<(), ConfigError> {
    let auth_url = required_for_reset(&config.auth_url, "auth_url")?;
    required_for_reset(&config.auth_id, "auth_id")?;
    required_for_reset(&config.auth_secret, "auth_secret")?;

    Url::parse(auth_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid vectara.auth_url: {}", e)))?;

    Ok(())
}

fn required_for_reset<'a>(
    value: &'a Option<String>,
    key: &str,
) -> Result<&'a str, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Validation(format!(
            "vectara.{} is required when vectara.reset_corpus is enabled",
            key
        ))),
    }
}

/// Validates crawl selection settings
fn validate_crawling_config(config: &CrawlingConfig) -> Result<(), ConfigError> {
    validate_crawler_type(&config.crawler_type)?;

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "crawling.timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Crawler types become module and class names, so keep them identifier-safe
fn validate_crawler_type(crawler_type: &str) -> Result<(), ConfigError> {
    if crawler_type.is_empty() {
        return Err(ConfigError::Validation(
            "crawling.crawler_type cannot be empty".to_string(),
        ));
    }

    if !crawler_type
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawling.crawler_type must be ASCII alphanumeric or '_', got '{}'",
            crawler_type
        )));
    }

    Ok(())
}
