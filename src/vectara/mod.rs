//! Vectara service calls made by the driver itself
//!
//! The driver only ever talks to Vectara for two administrative operations:
//! - Exchanging OAuth2 client credentials for a bearer token
//! - Resetting (emptying) a corpus before a crawl
//!
//! Indexing traffic belongs to the crawler implementations.

mod auth;
mod reset;

pub use auth::{fetch_token, AuthError, OAuthCredentials};
pub use reset::{reset_corpus, ResetOutcome, RESET_CORPUS_PATH};

use reqwest::Client;

/// Builds the HTTP client shared by every call in a run
///
/// No request timeout is set here; the crawler implementations own their own
/// timeout policy and the administrative calls use the client defaults.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("vectara-ingest/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Joins an endpoint host and a path into a request URL
///
/// Endpoints are normally bare hosts (`api.vectara.io`) and get `https://`.
/// An endpoint that already carries a scheme is used as-is.
///
/// # Example
///
/// ```
/// use vectara_ingest::vectara::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("api.vectara.io", "/v1/reset-corpus"),
///     "https://api.vectara.io/v1/reset-corpus"
/// );
/// ```
pub fn endpoint_url(endpoint: &str, path: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.starts_with("https://") || base.starts_with("http://") {
        format!("{}{}", base, path)
    } else {
        format!("https://{}{}", base, path)
    }
}
