use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat a `null` list as empty and drop `null` entries inside it
fn skip_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
  Ok(items.into_iter().flatten().collect())
}

/// Any Jira object identified by a `name` (issue type, status, version, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JiraNamed {
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
}

/// Represents a Jira user reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JiraUser {
  #[serde(rename = "displayName", default, deserialize_with = "null_as_default")]
  pub display_name: String,
}

/// Project reference embedded in an issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JiraProjectRef {
  #[serde(default, deserialize_with = "null_as_default")]
  pub key: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields.
///
/// Standard fields are typed; every other returned field, including the
/// instance-specific custom fields, is kept as raw JSON in `custom`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssueFields {
  #[serde(rename = "issuetype", default, deserialize_with = "null_as_default")]
  pub issue_type: JiraNamed,
  #[serde(default, deserialize_with = "null_as_default")]
  pub status: JiraNamed,
  #[serde(default, deserialize_with = "null_as_default")]
  pub summary: String,
  #[serde(default)]
  pub updated: Option<String>,
  #[serde(default)]
  pub created: Option<String>,
  #[serde(rename = "resolutiondate", default)]
  pub resolution_date: Option<String>,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub creator: Option<JiraUser>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub project: JiraProjectRef,
  #[serde(rename = "fixVersions", default, deserialize_with = "null_as_default")]
  pub fix_versions: Vec<JiraNamed>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub components: Vec<JiraNamed>,
  #[serde(default, deserialize_with = "skip_null_items")]
  pub labels: Vec<String>,
  #[serde(default)]
  pub resolution: Option<JiraNamed>,
  #[serde(flatten)]
  pub custom: Map<String, Value>,
}

impl JiraIssueFields {
  /// Look up a raw field by id, treating `null` as absent
  pub fn raw(&self, field_id: &str) -> Option<&Value> {
    self.custom.get(field_id).filter(|value| !value.is_null())
  }
}

/// Represents one page of `/rest/api/2/search` results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResponse {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
  #[serde(default)]
  pub total: usize,
  #[serde(default)]
  pub start_at: usize,
  #[serde(default)]
  pub max_results: usize,
}

/// Represents a Jira project
#[derive(Debug, Clone, Deserialize)]
pub struct JiraProject {
  pub key: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
}

/// An issue fetched with a narrowed field selection
#[derive(Debug, Clone, Deserialize)]
pub struct JiraFieldLookup {
  pub key: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub fields: Map<String, Value>,
}

impl JiraFieldLookup {
  /// A string field value, `None` when missing, null, blank, or not a string
  pub fn text(&self, field_id: &str) -> Option<&str> {
    self
      .fields
      .get(field_id)
      .and_then(Value::as_str)
      .filter(|text| !text.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use spillover_test_utils::{IssueJson, search_page};

  use super::*;

  #[test]
  fn test_jira_auth_debug_hides_token() {
    let auth = JiraAuth {
      username: "test_user".to_string(),
      api_token: "test_token".to_string(),
    };

    let rendered = format!("{auth:?}");
    assert!(rendered.contains("test_user"));
    assert!(!rendered.contains("test_token"));
  }

  #[test]
  fn test_jira_issue_deserialization() {
    let json = IssueJson::new("EXPD-42")
      .field("fixVersions", json!([{"name": "1.0"}, {"name": "1.1"}]))
      .field("labels", json!(["backend", "carryover"]))
      .field("customfield_10002", json!(5.0))
      .sprints(&["Sprint 1", "Sprint 2"])
      .epic("EXPD-1")
      .build();

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.key, "EXPD-42");
    assert_eq!(issue.fields.issue_type.name, "Story");
    assert_eq!(issue.fields.status.name, "In Progress");
    assert_eq!(issue.fields.summary, "Summary of EXPD-42");
    assert_eq!(issue.fields.project.name, "Expedition");
    assert_eq!(issue.fields.fix_versions.len(), 2);
    assert_eq!(issue.fields.labels, vec!["backend", "carryover"]);
    assert_eq!(
      issue.fields.assignee.as_ref().map(|user| user.display_name.as_str()),
      Some("Alice Example")
    );
    assert!(issue.fields.resolution.is_none());
    assert!(issue.fields.resolution_date.is_none());
    assert_eq!(issue.fields.raw("customfield_10002"), Some(&json!(5.0)));
    assert_eq!(issue.fields.raw("customfield_14182"), Some(&json!("EXPD-1")));
    assert!(issue.fields.raw("customfield_14181").is_some());
  }

  #[test]
  fn test_null_collections_and_missing_fields_default() {
    let json = json!({
      "key": "EXPD-7",
      "fields": {
        "summary": null,
        "fixVersions": null,
        "components": null,
        "labels": null,
        "assignee": null,
        "customfield_22311": null
      }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.fields.summary, "");
    assert!(issue.fields.fix_versions.is_empty());
    assert!(issue.fields.components.is_empty());
    assert!(issue.fields.labels.is_empty());
    assert!(issue.fields.assignee.is_none());
    assert!(issue.fields.raw("customfield_22311").is_none());
    assert!(issue.fields.raw("customfield_99999").is_none());
  }

  #[test]
  fn test_null_names_inside_objects_default() {
    let page = search_page(
      vec![
        IssueJson::new("EXPD-8")
          .field("assignee", json!({"displayName": null}))
          .field("creator", json!({"displayName": null}))
          .field("fixVersions", json!([{"name": null}]))
          .field("components", json!([{"name": null}, {"name": "api"}]))
          .field("labels", json!([null, "backend"]))
          .field("project", json!({"key": "EXPD", "name": null}))
          .field("status", json!({"name": null}))
          .build(),
      ],
      0,
      1,
    );

    let page: JiraSearchResponse = serde_json::from_value(page).unwrap();
    let fields = &page.issues[0].fields;

    assert_eq!(fields.assignee.as_ref().map(|user| user.display_name.as_str()), Some(""));
    assert_eq!(fields.creator.as_ref().map(|user| user.display_name.as_str()), Some(""));
    assert_eq!(fields.fix_versions[0].name, "");
    assert_eq!(fields.components[1].name, "api");
    assert_eq!(fields.labels, vec!["backend"]);
    assert_eq!(fields.project.key, "EXPD");
    assert_eq!(fields.project.name, "");
    assert_eq!(fields.status.name, "");
  }

  #[test]
  fn test_search_response_deserialization() {
    let json = json!({
      "startAt": 100,
      "maxResults": 100,
      "total": 250,
      "issues": [IssueJson::new("EXPD-1").build()]
    });

    let page: JiraSearchResponse = serde_json::from_value(json).unwrap();

    assert_eq!(page.start_at, 100);
    assert_eq!(page.total, 250);
    assert_eq!(page.issues.len(), 1);
  }

  #[test]
  fn test_field_lookup_text() {
    let lookup: JiraFieldLookup = serde_json::from_value(json!({
      "key": "EXPD-1",
      "fields": {"summary": "Platform rewrite", "blank": "  ", "number": 3}
    }))
    .unwrap();

    assert_eq!(lookup.text("summary"), Some("Platform rewrite"));
    assert_eq!(lookup.text("blank"), None);
    assert_eq!(lookup.text("number"), None);
    assert_eq!(lookup.text("missing"), None);
  }
}
