//! # Configuration Management
//!
//! Handles the optional `spillover.toml` configuration file, the Jira custom
//! field ids used by the report, and the resolved per-run configuration that
//! is threaded through the pipeline and the writer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default story points field for Jira Data Center/Server
pub const DEFAULT_STORY_POINTS_FIELD: &str = "customfield_10002";
/// Default sprint field for Jira Data Center/Server
pub const DEFAULT_SPRINT_FIELD: &str = "customfield_14181";
/// Default epic link field for Jira Data Center/Server
pub const DEFAULT_EPIC_LINK_FIELD: &str = "customfield_14182";
/// Field holding the epic's display title
pub const DEFAULT_EPIC_TITLE_FIELD: &str = "summary";
/// Default report filename
pub const DEFAULT_OUTPUT_FILE: &str = "spillover_rpt.tsv";

/// Name of the configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "spillover.toml";

static PROJECT_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("Failed to compile project key regex"));

/// Jira field ids used when fetching and rendering issues
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldIds {
  pub sprint: String,
  pub story_points: String,
  pub epic_link: String,
  pub epic_title: String,
  /// Optional pair-programming field. Unset means the column is a placeholder.
  pub pair: Option<String>,
}

impl Default for FieldIds {
  fn default() -> Self {
    Self {
      sprint: DEFAULT_SPRINT_FIELD.to_string(),
      story_points: DEFAULT_STORY_POINTS_FIELD.to_string(),
      epic_link: DEFAULT_EPIC_LINK_FIELD.to_string(),
      epic_title: DEFAULT_EPIC_TITLE_FIELD.to_string(),
      pair: None,
    }
  }
}

/// Contents of `spillover.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpilloverConfig {
  pub base_url: Option<String>,
  pub token_file: Option<PathBuf>,
  pub project: Option<String>,
  pub days_prior: Option<i64>,
  pub output_file: Option<String>,
  pub fields: FieldIds,
}

impl SpilloverConfig {
  /// Load a configuration file, returning defaults when it does not exist
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }
}

/// Represents the configuration directory for the spillover application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance from the platform conventions
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "spillover").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the configuration file or return defaults
  pub fn load_config(&self) -> Result<SpilloverConfig> {
    SpilloverConfig::load_from(&self.config_path())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Upper-case a project key and check it only holds letters and digits
pub fn normalize_project_key(raw: &str) -> Result<String> {
  let key = raw.trim().to_uppercase();
  if key.is_empty() {
    anyhow::bail!("Project key is required");
  }
  if !PROJECT_KEY_PATTERN.is_match(&key) {
    anyhow::bail!("Project key '{key}' must consist only of uppercase letters and numbers");
  }
  Ok(key)
}

/// Everything a single report run needs once all inputs have been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
  pub project: String,
  /// Look-back window in whole days
  pub days_prior: i64,
  pub fields: FieldIds,
  pub output_path: PathBuf,
  pub append: bool,
}

impl RunConfig {
  /// The configured pair field, if any
  pub fn pair_field(&self) -> Option<&str> {
    self.fields.pair.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_config_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let config = SpilloverConfig::load_from(&temp_dir.path().join("spillover.toml")).unwrap();

    assert_eq!(config, SpilloverConfig::default());
    assert_eq!(config.fields.sprint, DEFAULT_SPRINT_FIELD);
    assert_eq!(config.fields.epic_title, "summary");
    assert!(config.fields.pair.is_none());
  }

  #[test]
  fn test_partial_config_file_keeps_field_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spillover.toml");
    fs::write(
      &path,
      r#"
base_url = "https://jira.example.com"
project = "EXPD"
days_prior = 14

[fields]
pair = "customfield_22311"
sprint = "customfield_10020"
"#,
    )
    .unwrap();

    let config = SpilloverConfig::load_from(&path).unwrap();

    assert_eq!(config.base_url.as_deref(), Some("https://jira.example.com"));
    assert_eq!(config.project.as_deref(), Some("EXPD"));
    assert_eq!(config.days_prior, Some(14));
    assert_eq!(config.fields.pair.as_deref(), Some("customfield_22311"));
    assert_eq!(config.fields.sprint, "customfield_10020");
    assert_eq!(config.fields.story_points, DEFAULT_STORY_POINTS_FIELD);
    assert_eq!(config.fields.epic_link, DEFAULT_EPIC_LINK_FIELD);
  }

  #[test]
  fn test_malformed_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spillover.toml");
    fs::write(&path, "days_prior = \"lots\"").unwrap();

    let error = SpilloverConfig::load_from(&path).unwrap_err().to_string();

    assert!(error.contains("Failed to parse config"));
  }

  #[test]
  fn test_config_path_lives_in_config_dir() {
    let config_dirs = ConfigDirs {
      config_dir: PathBuf::from("/tmp/spillover-config"),
    };

    assert_eq!(
      config_dirs.config_path(),
      PathBuf::from("/tmp/spillover-config/spillover.toml")
    );
  }

  #[test]
  fn test_normalize_project_key() {
    assert_eq!(normalize_project_key(" expd ").unwrap(), "EXPD");
    assert_eq!(normalize_project_key("Team42").unwrap(), "TEAM42");
    assert!(normalize_project_key("").is_err());
    assert!(
      normalize_project_key("EX-PD")
        .unwrap_err()
        .to_string()
        .contains("uppercase letters and numbers")
    );
  }
}
