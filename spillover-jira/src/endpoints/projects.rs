use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::info;

use super::{decode, status_error};
use crate::client::JiraClient;
use crate::consts::LOOKUP_TIMEOUT;
use crate::models::JiraProject;

impl JiraClient {
  /// Get a Jira project by key
  pub async fn get_project(&self, project_key: &str) -> Result<JiraProject> {
    let response = self
      .get(&format!("/rest/api/2/project/{project_key}"), LOOKUP_TIMEOUT)
      .send()
      .await
      .context("Failed to validate project")?;

    match response.status() {
      StatusCode::OK => decode(response, "project validation response").await,
      _ => Err(
        status_error(
          response,
          format!("Project '{project_key}' does not exist (HTTP 404 Not Found)"),
        )
        .await,
      ),
    }
  }

  /// Check that a project exists, is visible, and really has the given key
  pub async fn validate_project(&self, project_key: &str) -> Result<JiraProject> {
    let project = self.get_project(project_key).await?;

    if project.key != project_key {
      anyhow::bail!(
        "Project key mismatch: expected '{}', got '{}'",
        project_key,
        project.key
      );
    }

    info!("Project '{}' found: {}", project.key, project.name);
    Ok(project)
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::create_jira_client;

  #[tokio::test]
  async fn test_validate_project() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/EXPD"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": "10400",
          "key": "EXPD",
          "name": "Expedition"
      })))
      .mount(&mock_server)
      .await;

    let project = client.validate_project("EXPD").await?;
    assert_eq!(project.key, "EXPD");
    assert_eq!(project.name, "Expedition");

    Ok(())
  }

  #[tokio::test]
  async fn test_validate_project_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/NOPE"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let error = client.validate_project("NOPE").await.unwrap_err().to_string();
    assert!(error.contains("'NOPE' does not exist"));

    Ok(())
  }

  #[tokio::test]
  async fn test_validate_project_key_mismatch() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/10400"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "key": "EXPD",
          "name": "Expedition"
      })))
      .mount(&mock_server)
      .await;

    let error = client.validate_project("10400").await.unwrap_err().to_string();
    assert!(error.contains("mismatch"));

    Ok(())
  }
}
