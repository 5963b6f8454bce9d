//! # Logging
//!
//! Tracing setup for the binary: a console layer whose level follows `-v`,
//! and an optional plain-text run log in the current directory.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::consts::{LOG_TIMESTAMP_FORMAT, PROGRAM_NAME};

/// Map the `-v` count to a console log level
pub fn level_for_verbosity(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  }
}

/// Name of the run log file for a run started at `started`
pub fn log_file_name(started: DateTime<Local>) -> String {
  format!("{PROGRAM_NAME}-{}.log", started.format(LOG_TIMESTAMP_FORMAT))
}

/// Initialize the global tracing subscriber.
///
/// With `log_to_file` set, everything at info level or above is also written
/// to a timestamped log file, which is returned.
pub fn init_tracing(verbose: u8, log_to_file: bool) -> Result<Option<PathBuf>> {
  let level = level_for_verbosity(verbose);

  let (file_layer, log_path) = if log_to_file {
    let path = PathBuf::from(log_file_name(Local::now()));
    let file = File::create(&path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    let file_level = LevelFilter::from_level(level).max(LevelFilter::INFO);
    let layer = fmt::layer()
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .with_filter(file_level);
    (Some(layer), Some(path))
  } else {
    (None, None)
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_filter(EnvFilter::from_default_env().add_directive(level.into())))
    .with(file_layer)
    .init();

  Ok(log_path)
}
