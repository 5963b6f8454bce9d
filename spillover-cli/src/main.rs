//! # Spillover CLI Entry Point
//!
//! The main entry point for the spillover command-line tool, which reports
//! Jira issues that were carried across more than one sprint.

use std::process;
use std::time::Instant;

use clap::Parser;
use spillover_cli::cli::{Cli, handle_cli};
use spillover_cli::logging::init_tracing;
use spillover_core::output::print_error;
use tracing::{debug, info};

fn main() {
  let started = Instant::now();

  // Parse CLI arguments using the derive-based implementation
  let cmd = Cli::parse();
  cmd.colors.apply();

  let log_path = match init_tracing(cmd.verbose, cmd.log) {
    Ok(log_path) => log_path,
    Err(e) => {
      print_error(&format!("Error initializing logging: {e:#}"));
      process::exit(1);
    }
  };
  if let Some(log_path) = &log_path {
    debug!("Writing run log to {}", log_path.display());
  }

  let result = handle_cli(cmd);

  let elapsed = started.elapsed().as_secs_f64();
  println!("\nExecution completed in {elapsed:.2} seconds");
  info!("Execution completed in {:.2} seconds", elapsed);

  if let Err(e) = result {
    info!("Run failed: {:#}", e);
    print_error(&format!("{e:#}"));
    process::exit(1);
  }
}
