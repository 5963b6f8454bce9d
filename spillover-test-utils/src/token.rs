use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a temporary Jira token file
///
/// The file and its directory are removed when the guard is dropped.
pub struct TokenFileGuard {
  temp_dir: TempDir,
  token_path: PathBuf,
}

impl TokenFileGuard {
  /// Create a token file with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let token_path = temp_dir.path().join("jira.token");
    fs::write(&token_path, content).expect("Failed to write test token file");

    Self { temp_dir, token_path }
  }

  /// Get the path to the token file
  pub fn path(&self) -> &Path {
    &self.token_path
  }

  /// Get the path to the temporary directory holding the token file
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
