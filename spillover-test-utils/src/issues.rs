//! Builders for Jira issue and search response JSON
//!
//! The field ids match the Data Center defaults used by spillover-core.

use serde_json::{Map, Value, json};

/// Default sprint field id
pub const SPRINT_FIELD: &str = "customfield_14181";
/// Default epic link field id
pub const EPIC_LINK_FIELD: &str = "customfield_14182";
/// Default story points field id
pub const STORY_POINTS_FIELD: &str = "customfield_10002";

/// Builder for a single issue as returned by `/rest/api/2/search`
pub struct IssueJson {
  key: String,
  fields: Map<String, Value>,
}

impl IssueJson {
  /// Create an issue with realistic defaults for every standard field
  pub fn new(key: &str) -> Self {
    let fields = json!({
      "issuetype": {"name": "Story"},
      "status": {"name": "In Progress"},
      "summary": format!("Summary of {key}"),
      "updated": "2025-03-10T09:30:00.000+0000",
      "created": "2025-02-01T08:00:00.000+0000",
      "resolutiondate": null,
      "assignee": {"displayName": "Alice Example"},
      "creator": {"displayName": "Rita Reporter"},
      "project": {"key": "EXPD", "name": "Expedition"},
      "fixVersions": [],
      "components": [],
      "labels": [],
      "resolution": null
    });

    let mut fields = fields.as_object().cloned().unwrap_or_default();
    for custom in [STORY_POINTS_FIELD, SPRINT_FIELD, EPIC_LINK_FIELD] {
      fields.insert(custom.to_string(), Value::Null);
    }

    Self {
      key: key.to_string(),
      fields,
    }
  }

  /// Set an arbitrary field
  pub fn field(mut self, name: &str, value: Value) -> Self {
    self.fields.insert(name.to_string(), value);
    self
  }

  /// Set the sprint history to structured records with the given names
  pub fn sprints(self, names: &[&str]) -> Self {
    let records: Vec<Value> = names.iter().map(|name| json!({"name": name})).collect();
    self.field(SPRINT_FIELD, Value::Array(records))
  }

  /// Link the issue to an epic
  pub fn epic(self, epic_key: &str) -> Self {
    self.field(EPIC_LINK_FIELD, json!(epic_key))
  }

  /// Mark the issue resolved at the given timestamp
  pub fn resolved(self, timestamp: &str) -> Self {
    self
      .field("resolutiondate", json!(timestamp))
      .field("resolution", json!({"name": "Done"}))
  }

  /// Produce the issue JSON
  pub fn build(self) -> Value {
    json!({
      "id": "10000",
      "key": self.key,
      "fields": Value::Object(self.fields)
    })
  }
}

/// A legacy greenhopper sprint string
pub fn legacy_sprint(id: u32, name: &str) -> String {
  format!(
    "com.atlassian.greenhopper.service.sprint.Sprint@5f1e{id}[id={id},rapidViewId=42,state=CLOSED,name={name},startDate=2025-01-06T09:00:00.000Z,endDate=2025-01-20T09:00:00.000Z]"
  )
}

/// A search response page
pub fn search_page(issues: Vec<Value>, start_at: usize, total: usize) -> Value {
  json!({
    "expand": "schema,names",
    "startAt": start_at,
    "maxResults": 100,
    "total": total,
    "issues": issues
  })
}
