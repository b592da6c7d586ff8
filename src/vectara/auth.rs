//! OAuth2 client-credentials token exchange
//!
//! Tokens are short-lived and never cached: every protected call fetches its own.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors from the token exchange
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Token request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Token response did not contain an access token")]
    MissingToken,
}

/// OAuth2 app client credentials
#[derive(Clone)]
pub struct OAuthCredentials {
    /// Authorization server base URL; the token endpoint is `<auth_url>/oauth2/token`
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl OAuthCredentials {
    /// Full URL of the token endpoint
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.auth_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Exchanges client credentials for a bearer token
///
/// Sends a `client_credentials` grant with HTTP Basic client authentication and no
/// scope. Failures are returned to the caller; there is no retry.
///
/// # Returns
///
/// * `Ok(String)` - The access token
/// * `Err(AuthError)` - Network failure, non-2xx response, or no token in the response
pub async fn fetch_token(
    client: &Client,
    credentials: &OAuthCredentials,
) -> Result<String, AuthError> {
    let url = credentials.token_endpoint();

    tracing::debug!("Requesting client-credentials token from {}", url);

    let response = client
        .post(&url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .header(ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|source| AuthError::Request {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|source| AuthError::Request { url, source })?;

    tracing::debug!(
        "Token issued, token_type={:?}, expires_in={:?}",
        token.token_type,
        token.expires_in
    );

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}
