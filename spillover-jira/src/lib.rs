//! # Jira API Client
//!
//! Provides the Jira REST API calls the spillover report needs: paginated
//! issue search, project lookup, and narrowed single-issue field lookups,
//! all authenticated with static basic-auth credentials read from a token
//! file.

pub mod auth;
mod client;
pub mod consts;
mod endpoints;
pub mod models;

pub use auth::{TokenFileError, create_jira_client_from_token_file, read_token_file};
// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{
  JiraAuth, JiraFieldLookup, JiraIssue, JiraIssueFields, JiraNamed, JiraProject, JiraSearchResponse, JiraUser,
};
