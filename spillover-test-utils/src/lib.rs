//! Test utilities shared across the spillover workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Token files in temporary directories ([`TokenFileGuard`])
//! - Jira issue JSON builders ([`IssueJson`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod issues;
pub mod token;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use issues::{EPIC_LINK_FIELD, IssueJson, SPRINT_FIELD, STORY_POINTS_FIELD, legacy_sprint, search_page};
pub use token::TokenFileGuard;
