//! # Client Creation
//!
//! Builds the tokio runtime and the authenticated Jira client for a run from
//! the resolved base URL and token file.

use std::path::Path;

use anyhow::{Context, Result};
pub use spillover_jira::create_jira_client;
use spillover_jira::{JiraClient, create_jira_client_from_token_file};
use tokio::runtime::Runtime;
use tracing::debug;

/// Creates a tokio runtime and an authenticated Jira client
///
/// The token file is read exactly once here; every request made through the
/// returned client reuses the parsed credentials.
pub fn create_jira_runtime_and_client(base_url: &str, token_file: &Path) -> Result<(Runtime, JiraClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_jira_client_from_token_file(base_url, token_file)?;
  debug!("Created Jira client for {}", client.base_url());
  Ok((rt, client))
}
