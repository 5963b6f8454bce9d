//! Authentication helpers for the Jira client.
//!
//! Credentials come from a token file holding a single `username:api-token`
//! line. They are read once per run and attached as HTTP basic auth to every
//! request the client makes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::JiraAuth;
use crate::{JiraClient, create_jira_client};

/// Errors raised while reading a token file
#[derive(Debug, Error)]
pub enum TokenFileError {
  #[error("Token file not found: {}", .0.display())]
  NotFound(PathBuf),
  #[error("Failed to read token file {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("Token file is empty: {}", .0.display())]
  Empty(PathBuf),
}

impl JiraAuth {
  /// Split a `username:api-token` credential string.
  ///
  /// A string without a colon is used as the username with an empty token.
  pub fn from_token(token: &str) -> Self {
    match token.split_once(':') {
      Some((username, api_token)) => Self {
        username: username.to_string(),
        api_token: api_token.to_string(),
      },
      None => Self {
        username: token.to_string(),
        api_token: String::new(),
      },
    }
  }
}

/// Read and validate a token file
pub fn read_token_file(path: &Path) -> Result<JiraAuth, TokenFileError> {
  let content = fs::read_to_string(path).map_err(|source| match source.kind() {
    io::ErrorKind::NotFound => TokenFileError::NotFound(path.to_path_buf()),
    _ => TokenFileError::Read {
      path: path.to_path_buf(),
      source,
    },
  })?;

  let token = content.trim();
  if token.is_empty() {
    return Err(TokenFileError::Empty(path.to_path_buf()));
  }
  if !token.contains(':') {
    warn!("API token might not be in expected format (username:token)");
  }

  info!("Successfully read API token from {}", path.display());
  Ok(JiraAuth::from_token(token))
}

/// Creates an authenticated Jira client using credentials from a token file.
pub fn create_jira_client_from_token_file(base_url: &str, token_file: &Path) -> Result<JiraClient> {
  let auth = read_token_file(token_file).context("Failed to get authentication token")?;

  Ok(create_jira_client(base_url, &auth.username, &auth.api_token))
}
