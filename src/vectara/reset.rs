//! Corpus reset
//!
//! Deletes every document in a corpus. Irreversible; only reached when the
//! operator turns on `vectara.reset_corpus`.

use crate::vectara::{endpoint_url, fetch_token, OAuthCredentials};
use crate::IngestError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Path of the reset endpoint on the Vectara API host
pub const RESET_CORPUS_PATH: &str = "/v1/reset-corpus";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetCorpusRequest<'a> {
    customer_id: &'a str,
    corpus_id: u64,
}

/// What the service said about a reset request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The service accepted the reset (HTTP 200)
    Reset,
    /// The service answered with another status; logged, not raised
    Failed { status: u16 },
}

/// Resets a corpus by deleting all documents and metadata
///
/// A fresh token is fetched first. A non-200 answer is logged and reported as
/// [`ResetOutcome::Failed`]; only token and transport failures are errors.
///
/// The deletion finishes asynchronously on the service side, so callers must wait
/// before assuming the corpus is empty.
pub async fn reset_corpus(
    client: &Client,
    endpoint: &str,
    customer_id: &str,
    corpus_id: u64,
    credentials: &OAuthCredentials,
) -> Result<ResetOutcome, IngestError> {
    let url = endpoint_url(endpoint, RESET_CORPUS_PATH);
    let token = fetch_token(client, credentials).await?;

    let response = client
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .header("customer-id", customer_id)
        .bearer_auth(&token)
        .json(&ResetCorpusRequest {
            customer_id,
            corpus_id,
        })
        .send()
        .await
        .map_err(|source| IngestError::Http {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if status == StatusCode::OK {
        tracing::info!("Reset corpus {}", corpus_id);
        return Ok(ResetOutcome::Reset);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Error resetting corpus: {} {}", status.as_u16(), body);

    Ok(ResetOutcome::Failed {
        status: status.as_u16(),
    })
}
