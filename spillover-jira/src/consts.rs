//! Constants for the spillover-jira client.

use std::time::Duration;

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Number of issues requested per search page
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Timeout for a single search page request
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for project and single-issue lookups
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
