//! # Epic Title Resolution
//!
//! Looks up the title of every epic referenced by the spillover rows, one
//! request per epic. A failed lookup only affects its own epic.

use std::collections::HashMap;

use spillover_jira::JiraClient;
use tracing::{info, warn};

/// Recorded when the epic lookup request fails
pub const EPIC_LOOKUP_FAILED: &str = "Epic Summary Lookup Failed";

/// Recorded when the epic has no usable title
pub const NO_EPIC_SUMMARY: &str = "No Epic Summary";

/// Epic key to title (or one of the sentinels above)
pub type EpicTitleMap = HashMap<String, String>;

/// Resolve titles for the given epic keys, sequentially and in order
pub async fn resolve_epic_titles(client: &JiraClient, epic_keys: &[String], title_field: &str) -> EpicTitleMap {
  let mut titles = EpicTitleMap::with_capacity(epic_keys.len());
  if epic_keys.is_empty() {
    return titles;
  }

  info!("Fetching titles for {} epics...", epic_keys.len());

  for epic_key in epic_keys {
    let title = match client.get_issue_fields(epic_key, &[title_field]).await {
      Ok(epic) => epic
        .text(title_field)
        .map(str::to_string)
        .unwrap_or_else(|| NO_EPIC_SUMMARY.to_string()),
      Err(e) => {
        warn!("Failed to fetch epic {}: {}", epic_key, e);
        EPIC_LOOKUP_FAILED.to_string()
      }
    };
    titles.insert(epic_key.clone(), title);
  }

  info!("Retrieved {} epic titles", titles.len());
  titles
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::clients::create_jira_client;

  async fn mount_epic(server: &MockServer, key: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
      .and(path(format!("/rest/api/2/issue/{key}")))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .expect(1)
      .mount(server)
      .await;
  }

  #[tokio::test]
  async fn test_resolve_epic_titles() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    mount_epic(
      &mock_server,
      "EXPD-100",
      200,
      json!({"key": "EXPD-100", "fields": {"summary": "Checkout redesign"}}),
    )
    .await;
    mount_epic(
      &mock_server,
      "EXPD-200",
      404,
      json!({"errorMessages": ["Issue does not exist"], "errors": {}}),
    )
    .await;
    mount_epic(
      &mock_server,
      "EXPD-300",
      200,
      json!({"key": "EXPD-300", "fields": {"summary": null}}),
    )
    .await;

    let keys = vec!["EXPD-100".to_string(), "EXPD-200".to_string(), "EXPD-300".to_string()];
    let titles = resolve_epic_titles(&client, &keys, "summary").await;

    assert_eq!(titles.len(), 3);
    assert_eq!(titles["EXPD-100"], "Checkout redesign");
    assert_eq!(titles["EXPD-200"], EPIC_LOOKUP_FAILED);
    assert_eq!(titles["EXPD-300"], NO_EPIC_SUMMARY);
  }

  #[tokio::test]
  async fn test_malformed_epic_body_is_a_lookup_failure() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/EXPD-100"))
      .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
      .mount(&mock_server)
      .await;

    let titles = resolve_epic_titles(&client, &["EXPD-100".to_string()], "summary").await;

    assert_eq!(titles["EXPD-100"], EPIC_LOOKUP_FAILED);
  }

  #[tokio::test]
  async fn test_custom_title_field() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/EXPD-100"))
      .and(query_param("fields", "customfield_14183"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "key": "EXPD-100",
          "fields": {"customfield_14183": "Checkout"}
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let titles = resolve_epic_titles(&client, &["EXPD-100".to_string()], "customfield_14183").await;

    assert_eq!(titles["EXPD-100"], "Checkout");
  }

  #[tokio::test]
  async fn test_no_epics_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(500))
      .expect(0)
      .mount(&mock_server)
      .await;

    let titles = resolve_epic_titles(&client, &[], "summary").await;

    assert!(titles.is_empty());
  }
}
