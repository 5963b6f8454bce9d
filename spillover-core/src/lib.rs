//! # Spillover Core Library
//!
//! Shared building blocks for the spillover report: run configuration,
//! decoding of the loosely-typed Jira custom fields (sprint history and pair
//! members), date handling, and user-facing output helpers.

pub mod config;
pub mod dates;
pub mod output;
pub mod pair;
pub mod prompts;
pub mod sprint;
pub mod url;

pub use config::{ConfigDirs, FieldIds, RunConfig, SpilloverConfig, get_config_dirs};
pub use dates::{DateWindow, DateWindowError, format_calendar_date, parse_timestamp};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use pair::{PairField, resolve_pair_value};
pub use sprint::{SprintField, SprintInfo, parse_sprint_field};
