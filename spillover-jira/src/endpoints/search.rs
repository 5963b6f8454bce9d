//! # Jira Search Endpoint
//!
//! JQL search with offset pagination. Pages are fetched one after another and
//! any failure aborts the whole search, so callers either get every matching
//! issue or an error.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::{debug, info};

use super::{body_text, decode, status_error};
use crate::client::JiraClient;
use crate::consts::{SEARCH_PAGE_SIZE, SEARCH_TIMEOUT};
use crate::models::{JiraIssue, JiraSearchResponse};

impl JiraClient {
  /// Fetch one page of search results starting at `start_at`
  pub async fn search_page(
    &self,
    jql: &str,
    start_at: usize,
    max_results: usize,
    fields: &[String],
  ) -> Result<JiraSearchResponse> {
    let mut query = vec![
      ("jql", jql.to_string()),
      ("startAt", start_at.to_string()),
      ("maxResults", max_results.to_string()),
    ];
    if !fields.is_empty() {
      query.push(("fields", fields.join(",")));
    }

    let response = self
      .get("/rest/api/2/search", SEARCH_TIMEOUT)
      .query(&query)
      .send()
      .await
      .context("Failed to fetch Jira search results")?;

    match response.status() {
      StatusCode::OK => decode(response, "Jira search results").await,
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the search query: {}",
        body_text(response).await
      )),
      _ => Err(status_error(response, "Jira search endpoint not found".to_string()).await),
    }
  }

  /// Fetch every issue matching `jql`, one page of [`SEARCH_PAGE_SIZE`] at a
  /// time, in the order Jira returns them.
  pub async fn search_all_issues(&self, jql: &str, fields: &[String]) -> Result<Vec<JiraIssue>> {
    let mut issues = Vec::new();
    let mut start_at = 0;
    let mut batch = 0;

    loop {
      batch += 1;
      info!("Fetching batch {}, starting at record {}...", batch, start_at);

      let page = self
        .search_page(jql, start_at, SEARCH_PAGE_SIZE, fields)
        .await
        .with_context(|| format!("Failed to fetch batch {batch}"))?;

      let fetched = page.issues.len();
      issues.extend(page.issues);
      info!("Fetched {} issues (Total: {}/{})", fetched, issues.len(), page.total);

      if fetched == 0 {
        debug!("Empty page returned, stopping pagination");
        break;
      }
      if start_at + SEARCH_PAGE_SIZE >= page.total {
        break;
      }
      start_at += SEARCH_PAGE_SIZE;
    }

    info!("Completed fetching {} issues in {} batches", issues.len(), batch);
    Ok(issues)
  }
}
