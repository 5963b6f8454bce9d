//! # Issue Pipeline
//!
//! Builds the search query for a project, fetches every matching issue, and
//! keeps the ones that were worked on in more than one sprint. Epic keys
//! referenced by the kept issues are collected once each, in first-seen
//! order, for the epic title lookup that follows.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use spillover_core::config::{FieldIds, RunConfig};
use spillover_core::dates::days_between;
use spillover_core::{SprintInfo, parse_sprint_field, parse_timestamp};
use spillover_jira::{JiraClient, JiraIssue};
use tracing::{debug, info};

use crate::consts::PROGRESS_INTERVAL;

/// Epic link placeholder for issues that are not linked to an epic
pub const NO_EPIC: &str = "No Epic";

/// Standard fields requested for every issue, in request order
const STANDARD_FIELDS: [&str; 14] = [
  "issuetype",
  "key",
  "summary",
  "status",
  "updated",
  "created",
  "resolutiondate",
  "assignee",
  "fixVersions",
  "components",
  "labels",
  "resolution",
  "creator",
  "project",
];

/// Build the JQL selecting sprint-tracked work items updated within the window
pub fn build_jql(project: &str, days_prior: i64) -> String {
  format!(
    "project = {project} AND issuetype not in (Epic, Risk, 'Sub Task') AND Sprint is not EMPTY AND updated >= -{days_prior}d"
  )
}

/// The field list sent with every search request
pub fn requested_fields(fields: &FieldIds) -> Vec<String> {
  let mut requested: Vec<String> = STANDARD_FIELDS.iter().map(|field| field.to_string()).collect();
  requested.push(fields.story_points.clone());
  requested.push(fields.epic_link.clone());
  requested.push(fields.sprint.clone());
  if let Some(pair) = &fields.pair {
    requested.push(pair.clone());
  }
  requested
}

/// The epic key an issue is linked to, if any
pub fn epic_link(issue: &JiraIssue, field_id: &str) -> Option<String> {
  match issue.fields.raw(field_id) {
    Some(Value::String(key)) if !key.trim().is_empty() => Some(key.trim().to_string()),
    _ => None,
  }
}

/// Whether an issue was resolved longer ago than the look-back window
pub fn resolved_before_window(issue: &JiraIssue, days_prior: i64, now: DateTime<Utc>) -> bool {
  issue
    .fields
    .resolution_date
    .as_deref()
    .and_then(parse_timestamp)
    .is_some_and(|resolved| days_between(resolved, now) > days_prior)
}

/// An issue that spilled over into more than one sprint
#[derive(Debug, Clone)]
pub struct ResultRow {
  pub issue: JiraIssue,
  pub sprints: SprintInfo,
  /// Linked epic key, or [`NO_EPIC`]
  pub epic_key: String,
}

impl ResultRow {
  pub fn has_epic(&self) -> bool {
    self.epic_key != NO_EPIC
  }
}

/// Everything the pipeline produced for one run
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
  /// Spillover rows in fetch order
  pub rows: Vec<ResultRow>,
  /// Unique epic keys referenced by `rows`, in first-seen order
  pub epic_keys: Vec<String>,
  /// Number of issues returned by the search
  pub issues_processed: usize,
}

/// Keep the spillover issues out of a fetched batch
pub fn classify_issues(
  issues: Vec<JiraIssue>,
  days_prior: i64,
  fields: &FieldIds,
  now: DateTime<Utc>,
) -> PipelineOutcome {
  let total = issues.len();
  let mut outcome = PipelineOutcome {
    issues_processed: total,
    ..Default::default()
  };
  let mut seen_epics = HashSet::new();

  for (index, issue) in issues.into_iter().enumerate() {
    if index % PROGRESS_INTERVAL == 0 {
      info!("Processing issue {} of {}: {}", index + 1, total, issue.key);
    }

    if resolved_before_window(&issue, days_prior, now) {
      debug!("Skipping {}: resolved before the window", issue.key);
      continue;
    }

    let sprints = parse_sprint_field(issue.fields.raw(&fields.sprint));
    if !sprints.is_spillover() {
      continue;
    }

    let epic_key = epic_link(&issue, &fields.epic_link).unwrap_or_else(|| NO_EPIC.to_string());
    if epic_key != NO_EPIC && seen_epics.insert(epic_key.clone()) {
      outcome.epic_keys.push(epic_key.clone());
    }

    outcome.rows.push(ResultRow {
      issue,
      sprints,
      epic_key,
    });
  }

  info!(
    "Found {} issues that have been worked on in multiple sprints",
    outcome.rows.len()
  );
  outcome
}

/// Fetch every candidate issue for the run and keep the spillovers.
///
/// Any failure while paging through the search aborts the whole run.
pub async fn collect_spillover(client: &JiraClient, config: &RunConfig) -> Result<PipelineOutcome> {
  let jql = build_jql(&config.project, config.days_prior);
  debug!("JQL: {}", jql);

  info!("Fetching issues from Jira...");
  let issues = client
    .search_all_issues(&jql, &requested_fields(&config.fields))
    .await?;

  if !issues.is_empty() {
    info!(
      "Processing {} issues to identify multi-sprint items...",
      issues.len()
    );
  }

  Ok(classify_issues(issues, config.days_prior, &config.fields, Utc::now()))
}
