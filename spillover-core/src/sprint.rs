//! # Sprint Field Parser
//!
//! Normalizes the sprint-history custom field into an ordered list of unique
//! sprint names. The field has changed shape between Jira versions: older
//! servers return `com.atlassian.greenhopper.service.sprint.Sprint@...[name=X,...]`
//! strings, newer ones return structured records with a `name` attribute.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

static LEGACY_NAME_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"name=([^,]+)").expect("Failed to compile sprint name regex"));

/// A structured sprint record as returned by newer Jira versions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SprintRecord {
  pub name: String,
}

/// The decoded shape of a sprint-history value.
///
/// Decoding tries each interpretation in declaration order and keeps the first
/// one that fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SprintField {
  /// Field missing or `null`
  Absent,
  /// A single legacy sprint string
  Text(String),
  /// A list of legacy sprint strings
  TextList(Vec<String>),
  /// A list of structured sprint records
  Records(Vec<SprintRecord>),
  /// Any other JSON shape
  Unrecognized,
}

impl SprintField {
  /// Decode a raw field value into one of the known shapes
  pub fn decode(value: Option<&Value>) -> Self {
    let Some(value) = value else {
      return Self::Absent;
    };
    if value.is_null() {
      return Self::Absent;
    }

    if let Ok(text) = String::deserialize(value) {
      return Self::Text(text);
    }
    if let Ok(texts) = Vec::<String>::deserialize(value) {
      return Self::TextList(texts);
    }
    if let Ok(records) = Vec::<SprintRecord>::deserialize(value) {
      return Self::Records(records);
    }

    Self::Unrecognized
  }

  /// Sprint names in encounter order, duplicates included
  fn names(&self) -> Vec<String> {
    match self {
      Self::Absent | Self::Unrecognized => Vec::new(),
      Self::Text(text) => legacy_name(text).into_iter().collect(),
      Self::TextList(texts) => texts.iter().filter_map(|text| legacy_name(text)).collect(),
      Self::Records(records) => records.iter().map(|record| record.name.clone()).collect(),
    }
  }
}

/// Extract the `name=<value>` part of a legacy sprint string
fn legacy_name(text: &str) -> Option<String> {
  LEGACY_NAME_PATTERN
    .captures(text)
    .and_then(|captures| captures.get(1))
    .map(|name| name.as_str().to_string())
}

/// Sprint information derived from an issue's sprint history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintInfo {
  /// Number of distinct sprints
  pub count: usize,
  /// Unique sprint names in first-seen order
  pub names: Vec<String>,
  /// First sprint, set only when `count > 0`
  pub first: Option<String>,
  /// Last sprint, set only when `count > 0`
  pub last: Option<String>,
  /// All sprint names joined by `", "`
  pub all: String,
}

impl SprintInfo {
  /// Build sprint information from names in encounter order, dropping repeats
  pub fn from_names<I>(names: I) -> Self
  where
    I: IntoIterator<Item = String>,
  {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for name in names {
      if seen.insert(name.clone()) {
        unique.push(name);
      }
    }

    Self {
      count: unique.len(),
      first: unique.first().cloned(),
      last: unique.last().cloned(),
      all: unique.join(", "),
      names: unique,
    }
  }

  /// Whether the issue was worked on in more than one sprint
  pub fn is_spillover(&self) -> bool {
    self.count > 1
  }
}

/// Parse a raw sprint-history value.
///
/// Unknown shapes produce an empty result rather than an error.
pub fn parse_sprint_field(value: Option<&Value>) -> SprintInfo {
  let field = SprintField::decode(value);
  if field == SprintField::Unrecognized {
    warn!("Sprint field has an unrecognized shape, treating it as empty");
  }
  SprintInfo::from_names(field.names())
}
