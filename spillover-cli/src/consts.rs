//! Constants for the spillover CLI
//!
//! Program naming, default paths, and fixed text used by the report and the
//! run summary.

/// Program name used for the banner and the run log file name
pub const PROGRAM_NAME: &str = "spillover";

/// Extension every report path ends with
pub const REPORT_EXTENSION: &str = "tsv";

/// Token file looked up in the current directory when none is configured
pub const DEFAULT_TOKEN_FILE: &str = "jira.token";

/// Timestamp layout used in the run log file name
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Progress is logged after this many processed issues
pub const PROGRESS_INTERVAL: usize = 100;
