//! # Command Line Interface
//!
//! Defines the CLI for the spillover tool and runs a report: resolve the
//! settings, validate the project, fetch and classify issues, look up epic
//! titles, and write the TSV file.

pub mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use spillover_core::config::RunConfig;
use spillover_core::output::{ColorMode, format_count, format_path, print_banner, print_info, print_success, print_warning};
use spillover_core::prompts::{NoPrompter, Prompter, TerminalPrompter};
use spillover_core::url::jira_host_from_env;
use spillover_jira::JiraClient;
use tracing::{info, warn};

use self::settings::{load_file_config, resolve_settings};
use crate::clients::create_jira_runtime_and_client;
use crate::consts::PROGRAM_NAME;
use crate::epics::resolve_epic_titles;
use crate::pipeline::collect_spillover;
use crate::writer::{WriteSummary, write_report};

/// Reports Jira issues that were worked on in more than one sprint
#[derive(Parser, Debug)]
#[command(name = "spillover")]
#[command(display_name = "Spillover")]
#[command(about = "Report Jira issues that spilled over across sprints")]
#[command(
  long_about = "Identifies and reports on Jira \"spillover\" issues: work items that were carried\n\
        across more than one sprint. Matching issues are written to a tab-separated\n\
        file together with their sprint history, epic, and assignment details.\n\n\
        Values not given on the command line are taken from $JIRA_HOST, the\n\
        spillover.toml config file, or an interactive prompt."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Path to a file holding `username:api-token`
  #[arg(short = 't', long, value_name = "PATH")]
  pub token_file: Option<PathBuf>,

  /// Jira base URL (e.g., https://jira.company.com)
  #[arg(short = 'u', long, value_name = "URL")]
  pub url: Option<String>,

  /// Jira project key (e.g., EXPD)
  #[arg(short = 'p', long, value_name = "KEY")]
  pub project: Option<String>,

  /// Start date in yyyy-mm-dd format. Overrides --days-prior
  #[arg(short = 'f', long, value_name = "DATE")]
  pub from_date: Option<String>,

  /// Number of days prior to today to check (default: 10)
  #[arg(short = 'd', long, value_name = "DAYS", allow_negative_numbers = true)]
  pub days_prior: Option<i64>,

  /// Output file name (default: spillover_rpt.tsv)
  #[arg(short = 'o', long, value_name = "FILE")]
  pub output_file: Option<String>,

  /// Append to an existing output file instead of overwriting it
  #[arg(short = 'a', long)]
  pub append: bool,

  /// Also write the run log to a timestamped file in the current directory
  #[arg(short = 'l', long)]
  pub log: bool,

  /// Read settings from this config file instead of the default location
  #[arg(long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Never prompt; fail when a required value is missing
  #[arg(long)]
  pub no_input: bool,

  /// Custom field id holding the sprint history
  #[arg(long, value_name = "FIELD_ID")]
  pub sprint_field: Option<String>,

  /// Custom field id holding story points
  #[arg(long, value_name = "FIELD_ID")]
  pub story_points_field: Option<String>,

  /// Custom field id holding the epic link
  #[arg(long, value_name = "FIELD_ID")]
  pub epic_link_field: Option<String>,

  /// Field id holding the epic title (default: summary)
  #[arg(long, value_name = "FIELD_ID")]
  pub epic_title_field: Option<String>,

  /// Custom field id holding pair-programming partners
  #[arg(long, value_name = "FIELD_ID")]
  pub pair_field: Option<String>,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,
}

/// Result of a report run that found issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
  pub issues_processed: usize,
  pub spillovers: usize,
  pub written: WriteSummary,
}

/// Validate the project, collect spillover issues, and write the report.
///
/// Returns `None` when the search matched no issues; nothing is written then.
pub async fn run_report(client: &JiraClient, config: &RunConfig) -> Result<Option<ReportOutcome>> {
  client.validate_project(&config.project).await.with_context(|| {
    format!(
      "Failed to validate project '{}'. Please verify the project key and credentials",
      config.project
    )
  })?;

  let outcome = collect_spillover(client, config)
    .await
    .context("Failed to fetch issues")?;

  if outcome.issues_processed == 0 {
    warn!("No issues found matching the criteria");
    return Ok(None);
  }

  let epic_titles = resolve_epic_titles(client, &outcome.epic_keys, &config.fields.epic_title).await;

  info!("Formatting output data...");
  let written = write_report(
    &config.output_path,
    config.append,
    &outcome.rows,
    &epic_titles,
    &config.fields,
  )
  .context("Failed to write output file")?;

  if let Some(pair_field) = config.pair_field()
    && written.rows_written > 0
    && written.pair_values_found == 0
  {
    warn!("Pair field '{}' had no value on any spillover issue", pair_field);
  }

  Ok(Some(ReportOutcome {
    issues_processed: outcome.issues_processed,
    spillovers: outcome.rows.len(),
    written,
  }))
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  print_banner(PROGRAM_NAME, env!("CARGO_PKG_VERSION"));
  info!("Starting {} v{}", PROGRAM_NAME, env!("CARGO_PKG_VERSION"));

  let file_config = load_file_config(cli.config.as_deref())?;
  let prompter: Box<dyn Prompter> = if cli.no_input {
    Box::new(NoPrompter)
  } else {
    Box::new(TerminalPrompter)
  };
  let settings = resolve_settings(&cli, &file_config, jira_host_from_env(), prompter.as_ref(), Utc::now())?;

  let (rt, client) = create_jira_runtime_and_client(&settings.base_url, &settings.token_file)?;
  let outcome = rt.block_on(run_report(&client, &settings.run))?;

  match outcome {
    None => print_warning("No issues found matching the criteria"),
    Some(outcome) => {
      print_success(&format!(
        "Success! Processed {} issues and found {} spillover issues.",
        format_count(outcome.issues_processed),
        format_count(outcome.spillovers)
      ));
      let path = outcome.written.path.display().to_string();
      if settings.run.append {
        print_info(&format!("Results appended to: {}", format_path(&path)));
      } else {
        print_info(&format!("Results saved to: {}", format_path(&path)));
      }
    }
  }

  Ok(())
}
