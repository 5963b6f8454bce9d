//! # Jira Issue Endpoints
//!
//! Single-issue lookups with a narrowed field selection, used to resolve the
//! titles of linked epics.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use super::{decode, status_error};
use crate::client::JiraClient;
use crate::consts::LOOKUP_TIMEOUT;
use crate::models::JiraFieldLookup;

impl JiraClient {
  /// Get selected fields of a Jira issue by key
  pub async fn get_issue_fields(&self, issue_key: &str, fields: &[&str]) -> Result<JiraFieldLookup> {
    let response = self
      .get(&format!("/rest/api/2/issue/{issue_key}"), LOOKUP_TIMEOUT)
      .query(&[("fields", fields.join(","))])
      .send()
      .await
      .context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => decode(response, "Jira issue").await,
      _ => Err(status_error(response, format!("Issue {issue_key} not found")).await),
    }
  }
}
