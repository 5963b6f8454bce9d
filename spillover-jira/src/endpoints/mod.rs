//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by Jira resource: issue search, single
//! issue lookups, and projects.

use anyhow::Result;
use reqwest::{Response, StatusCode};
use tracing::debug;

pub mod issues;
pub mod projects;
pub mod search;

/// Turn a non-success response into an error with a useful message
pub(crate) async fn status_error(response: Response, not_found: String) -> anyhow::Error {
  match response.status() {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      anyhow::anyhow!("Authentication failed. Please check your Jira credentials.")
    }
    StatusCode::NOT_FOUND => anyhow::anyhow!(not_found),
    status => anyhow::anyhow!(
      "Unexpected error: HTTP {} - {}",
      status,
      body_text(response).await
    ),
  }
}

/// Read an error response body for a message, noting when it cannot be read
pub(crate) async fn body_text(response: Response) -> String {
  match response.text().await {
    Ok(body) => body,
    Err(err) => {
      debug!("Failed to read response body: {}", err);
      "<body unavailable>".to_string()
    }
  }
}

/// Decode a JSON body, naming the resource on failure
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(response: Response, what: &str) -> Result<T> {
  response
    .json::<T>()
    .await
    .map_err(|err| anyhow::anyhow!("Failed to parse {what}: {err}"))
}
