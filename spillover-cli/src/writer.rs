//! # Report Writer
//!
//! Serializes spillover rows as tab-separated text, one line per issue under a
//! fixed 22-column header.
//!
//! When appending, the header is written only if the output path does not
//! exist yet. Only existence is checked, so appending to an existing empty
//! file produces rows without a header.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use spillover_core::config::FieldIds;
use spillover_core::{format_calendar_date, resolve_pair_value};
use spillover_jira::{JiraNamed, JiraUser};
use tracing::info;

use crate::consts::REPORT_EXTENSION;
use crate::epics::{EpicTitleMap, NO_EPIC_SUMMARY};
use crate::pipeline::ResultRow;

/// Report columns, in output order
pub const HEADER: [&str; 22] = [
  "Issue Type",
  "Issue Key",
  "Summary",
  "Status",
  "Updated Date",
  "Created Date",
  "Resolved Date",
  "Assignee",
  "Pair",
  "Project",
  "Fix Versions",
  "Components",
  "Story Points",
  "Epic Link",
  "Epic Summary",
  "Labels",
  "Resolution",
  "Reporter",
  "Number of Sprints",
  "First Sprint",
  "Last Sprint",
  "All Sprints",
];

/// Written in the pair column when no pair field is configured
pub const PAIR_PLACEHOLDER: &str = "Pair";
const UNASSIGNED: &str = "Unassigned";
const UNKNOWN_REPORTER: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// What a report write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
  pub rows_written: usize,
  /// Rows whose configured pair field resolved to a non-empty value
  pub pair_values_found: usize,
  pub header_written: bool,
  pub path: PathBuf,
}

/// Append the report extension unless the name already ends with it
pub fn normalize_output_path(raw: &str) -> PathBuf {
  let raw = raw.trim();
  let suffix = format!(".{REPORT_EXTENSION}");
  if raw.ends_with(&suffix) {
    PathBuf::from(raw)
  } else {
    PathBuf::from(format!("{raw}{suffix}"))
  }
}

/// Write the report to `path`, creating or truncating it unless `append` is set
pub fn write_report(
  path: &Path,
  append: bool,
  rows: &[ResultRow],
  epic_titles: &EpicTitleMap,
  fields: &FieldIds,
) -> Result<WriteSummary> {
  let write_header = !append || !path.exists();

  let file = if append {
    OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("Failed to open output file {}", path.display()))?
  } else {
    File::create(path).with_context(|| format!("Failed to create output file {}", path.display()))?
  };

  let mut out = BufWriter::new(file);
  let (rows_written, pair_values_found) = write_rows(&mut out, write_header, rows, epic_titles, fields)
    .with_context(|| format!("Failed to write output file {}", path.display()))?;
  out
    .flush()
    .with_context(|| format!("Failed to write output file {}", path.display()))?;

  if append {
    info!("Successfully appended {} issues to {}", rows_written, path.display());
  } else {
    info!("Successfully wrote {} issues to {}", rows_written, path.display());
  }

  Ok(WriteSummary {
    rows_written,
    pair_values_found,
    header_written: write_header,
    path: path.to_path_buf(),
  })
}

/// Write the optional header and one line per row.
///
/// Returns the number of rows written and how many had a pair value.
pub fn write_rows<W: Write>(
  mut out: W,
  write_header: bool,
  rows: &[ResultRow],
  epic_titles: &EpicTitleMap,
  fields: &FieldIds,
) -> Result<(usize, usize)> {
  if write_header {
    writeln!(out, "{}", HEADER.join("\t")).context("Failed to write header")?;
  }

  let mut pair_values_found = 0;
  for row in rows {
    let (columns, pair_found) = format_row(row, epic_titles, fields);
    if pair_found {
      pair_values_found += 1;
    }
    writeln!(out, "{}", columns.join("\t")).context("Failed to write data row")?;
  }

  Ok((rows.len(), pair_values_found))
}

/// Render the columns for one row, plus whether a pair value was found
pub fn format_row(row: &ResultRow, epic_titles: &EpicTitleMap, fields: &FieldIds) -> (Vec<String>, bool) {
  let issue = &row.issue.fields;

  let (pair, pair_found) = match &fields.pair {
    Some(field_id) => {
      let value = resolve_pair_value(issue.raw(field_id));
      let found = !value.is_empty();
      (value, found)
    }
    None => (PAIR_PLACEHOLDER.to_string(), false),
  };

  let epic_summary = epic_titles
    .get(&row.epic_key)
    .map(String::as_str)
    .unwrap_or(NO_EPIC_SUMMARY);

  let columns = vec![
    issue.issue_type.name.clone(),
    row.issue.key.clone(),
    issue.summary.clone(),
    issue.status.name.clone(),
    format_calendar_date(issue.updated.as_deref()),
    format_calendar_date(issue.created.as_deref()),
    format_calendar_date(issue.resolution_date.as_deref()),
    display_name(issue.assignee.as_ref(), UNASSIGNED),
    pair,
    issue.project.name.clone(),
    join_names(&issue.fix_versions),
    join_names(&issue.components),
    format_story_points(issue.raw(&fields.story_points)),
    row.epic_key.clone(),
    epic_summary.to_string(),
    issue.labels.join(", "),
    issue
      .resolution
      .as_ref()
      .map(|resolution| resolution.name.clone())
      .unwrap_or_default(),
    display_name(issue.creator.as_ref(), UNKNOWN_REPORTER),
    row.sprints.count.to_string(),
    row.sprints.first.clone().unwrap_or_default(),
    row.sprints.last.clone().unwrap_or_default(),
    row.sprints.all.clone(),
  ];

  (columns.iter().map(|column| sanitize(column)).collect(), pair_found)
}

/// Story points as plain text. Whole numbers drop the fractional part.
pub fn format_story_points(value: Option<&Value>) -> String {
  match value {
    None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
    Some(Value::String(text)) => text.clone(),
    Some(Value::Number(number)) if number.is_f64() => number
      .as_f64()
      .map(|points| points.to_string())
      .unwrap_or_else(|| number.to_string()),
    Some(other) => other.to_string(),
  }
}

fn display_name(user: Option<&JiraUser>, fallback: &str) -> String {
  user
    .map(|user| user.display_name.as_str())
    .filter(|name| !name.is_empty())
    .unwrap_or(fallback)
    .to_string()
}

fn join_names(items: &[JiraNamed]) -> String {
  items
    .iter()
    .map(|item| item.name.as_str())
    .filter(|name| !name.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Keep tabs and line breaks in free text from splitting rows or columns
fn sanitize(value: &str) -> String {
  value.replace(['\t', '\r', '\n'], " ")
}
