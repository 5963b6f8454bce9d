//! # Run Settings
//!
//! Resolves every input of a run. Each value comes from the first source that
//! has it: command line flag, environment, `spillover.toml`, interactive
//! prompt, then the built-in default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use spillover_core::config::{DEFAULT_OUTPUT_FILE, FieldIds, RunConfig, normalize_project_key};
use spillover_core::dates::DEFAULT_DAYS_PRIOR;
use spillover_core::prompts::Prompter;
use spillover_core::url::normalize_base_url;
use spillover_core::{DateWindow, SpilloverConfig, get_config_dirs};
use tracing::{info, warn};

use super::Cli;
use crate::consts::DEFAULT_TOKEN_FILE;
use crate::writer::normalize_output_path;

/// Resolved inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub base_url: String,
  pub token_file: PathBuf,
  pub run: RunConfig,
}

/// Load `spillover.toml` from an explicit path or the user's config directory
pub fn load_file_config(explicit: Option<&Path>) -> Result<SpilloverConfig> {
  match explicit {
    Some(path) => {
      if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
      }
      SpilloverConfig::load_from(path)
    }
    None => get_config_dirs()?.load_config(),
  }
}

/// Resolve the run settings from all sources
pub fn resolve_settings(
  cli: &Cli,
  file: &SpilloverConfig,
  env_host: Option<String>,
  prompter: &dyn Prompter,
  now: DateTime<Utc>,
) -> Result<Settings> {
  let base_url = resolve_base_url(cli, file, env_host, prompter)?;
  let token_file = resolve_token_file(cli, file, prompter)?;
  let project = resolve_project(cli, file, prompter)?;
  let days_prior = resolve_days_prior(cli, file, prompter, now)?;
  let output_path = resolve_output_path(cli, file, prompter)?;

  Ok(Settings {
    base_url,
    token_file,
    run: RunConfig {
      project,
      days_prior,
      fields: resolve_fields(cli, &file.fields),
      output_path,
      append: cli.append,
    },
  })
}

fn non_blank(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|value| !value.is_empty())
    .map(str::to_string)
}

fn resolve_base_url(
  cli: &Cli,
  file: &SpilloverConfig,
  env_host: Option<String>,
  prompter: &dyn Prompter,
) -> Result<String> {
  let raw = if let Some(url) = non_blank(cli.url.as_deref()) {
    info!("Using Jira base URL from command line: {}", url);
    url
  } else if let Some(url) = non_blank(env_host.as_deref()) {
    info!("Using Jira base URL from environment: {}", url);
    url
  } else if let Some(url) = non_blank(file.base_url.as_deref()) {
    info!("Using Jira base URL from config file: {}", url);
    url
  } else {
    prompter
      .ask("Enter the Jira base URL (e.g., https://jira.company.com)")?
      .context("Jira base URL is required")?
  };

  normalize_base_url(&raw)
}

fn resolve_token_file(cli: &Cli, file: &SpilloverConfig, prompter: &dyn Prompter) -> Result<PathBuf> {
  if let Some(path) = cli.token_file.clone().or_else(|| file.token_file.clone()) {
    info!("Using token file: {}", path.display());
    return Ok(path);
  }

  let path = prompter
    .ask(&format!(
      "Enter the path to your Jira API token file (default {DEFAULT_TOKEN_FILE})"
    ))?
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));
  info!("Using token file: {}", path.display());
  Ok(path)
}

fn resolve_project(cli: &Cli, file: &SpilloverConfig, prompter: &dyn Prompter) -> Result<String> {
  let raw = match non_blank(cli.project.as_deref()).or_else(|| non_blank(file.project.as_deref())) {
    Some(project) => project,
    None => prompter.ask("Enter the Jira Project ID (e.g., EXPD)")?.unwrap_or_default(),
  };

  let project = normalize_project_key(&raw)?;
  info!("Using project key: {}", project);
  Ok(project)
}

fn resolve_days_prior(
  cli: &Cli,
  file: &SpilloverConfig,
  prompter: &dyn Prompter,
  now: DateTime<Utc>,
) -> Result<i64> {
  let from_date = non_blank(cli.from_date.as_deref());
  let window = if from_date.is_some() || cli.days_prior.is_some() {
    DateWindow::resolve(from_date.as_deref(), cli.days_prior)?
  } else if file.days_prior.is_some() {
    DateWindow::resolve(None, file.days_prior)?
  } else {
    prompt_window(prompter)?
  };

  let days = window.days_at(now)?;
  let since = now - chrono::Duration::days(days);
  info!(
    "Using date range: {} to present ({} days)",
    since.format("%Y-%m-%d"),
    days
  );
  Ok(days)
}

fn prompt_window(prompter: &dyn Prompter) -> Result<DateWindow> {
  if let Some(from_date) = prompter.ask("Enter a specific date to check from (yyyy-mm-dd), or leave blank")? {
    return Ok(DateWindow::resolve(Some(&from_date), None)?);
  }

  let answer = prompter.ask(&format!(
    "Enter number of days prior to check from (default = {DEFAULT_DAYS_PRIOR})"
  ))?;
  let days = match answer {
    Some(answer) => match answer.parse::<i64>() {
      Ok(days) if days > 0 => Some(days),
      _ => {
        warn!("Invalid input '{}'. Using default of {} days", answer, DEFAULT_DAYS_PRIOR);
        None
      }
    },
    None => None,
  };

  Ok(DateWindow::resolve(None, days)?)
}

fn resolve_output_path(cli: &Cli, file: &SpilloverConfig, prompter: &dyn Prompter) -> Result<PathBuf> {
  let raw = match non_blank(cli.output_file.as_deref()).or_else(|| non_blank(file.output_file.as_deref())) {
    Some(output) => output,
    None => prompter
      .ask(&format!(
        "Enter the filename to save the results (default *overwrites* {DEFAULT_OUTPUT_FILE})"
      ))?
      .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
  };

  let path = normalize_output_path(&raw);
  info!("Using output file: {}", path.display());
  Ok(path)
}

fn resolve_fields(cli: &Cli, file_fields: &FieldIds) -> FieldIds {
  let pick = |flag: &Option<String>, configured: &String| non_blank(flag.as_deref()).unwrap_or_else(|| configured.clone());

  FieldIds {
    sprint: pick(&cli.sprint_field, &file_fields.sprint),
    story_points: pick(&cli.story_points_field, &file_fields.story_points),
    epic_link: pick(&cli.epic_link_field, &file_fields.epic_link),
    epic_title: pick(&cli.epic_title_field, &file_fields.epic_title),
    pair: non_blank(cli.pair_field.as_deref()).or_else(|| non_blank(file_fields.pair.as_deref())),
  }
}
