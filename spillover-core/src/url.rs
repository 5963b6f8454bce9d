//! URL helpers for the Jira base URL.
//!
//! The base URL may come from a flag, the `JIRA_HOST` environment variable,
//! the config file, or a prompt, so it is normalized in one place.

use anyhow::Result;
use url::{Position, Url};

/// Environment variable storing the Jira host configuration.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Read the `$JIRA_HOST` environment variable, if set and non-empty
pub fn jira_host_from_env() -> Option<String> {
  std::env::var(ENV_JIRA_HOST).ok().filter(|host| !host.trim().is_empty())
}

/// Render a URL without a trailing slash on its path.
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);
  result.push_str(url.path().trim_end_matches('/'));

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{input}");
  Url::parse(&with_scheme).map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Normalize a Jira base URL.
///
/// Adds `https://` when no scheme is present, repairs `http:/host` style
/// typos, and strips trailing slashes so endpoint paths can be appended.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    anyhow::bail!("Jira base URL cannot be empty");
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http", "https"] {
    let prefix = format!("{scheme}:");
    if lowered.starts_with(&prefix) && !lowered.starts_with(&format!("{scheme}://")) {
      let remainder = trimmed[prefix.len()..].trim_start_matches('/');
      return parse_with_https_prefix(remainder).map(|url| normalize_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}

#[cfg(test)]
mod tests {
  use spillover_test_utils::EnvVarGuard;
  use test_case::test_case;

  use super::*;

  #[test_case("https://jira.company.com", "https://jira.company.com" ; "https kept")]
  #[test_case("http://jira.company.com", "http://jira.company.com" ; "http kept")]
  #[test_case("jira.company.com", "https://jira.company.com" ; "scheme added")]
  #[test_case("https://jira.company.com/", "https://jira.company.com" ; "root slash stripped")]
  #[test_case("https://company.com/jira///", "https://company.com/jira" ; "context path slashes stripped")]
  #[test_case("localhost:8080", "https://localhost:8080" ; "host with port")]
  #[test_case("HTTPS://Jira.Company.com", "https://jira.company.com" ; "case folded")]
  #[test_case("http:/jira.company.com", "https://jira.company.com" ; "broken http scheme")]
  #[test_case("https:jira.company.com", "https://jira.company.com" ; "broken https scheme")]
  fn test_normalize_base_url(input: &str, expected: &str) {
    assert_eq!(normalize_base_url(input).unwrap(), expected);
  }

  #[test]
  fn test_normalize_base_url_rejects_blank() {
    let error = normalize_base_url("   ").unwrap_err().to_string();

    assert!(error.contains("cannot be empty"));
  }

  #[test]
  fn test_jira_host_from_env() {
    let guard = EnvVarGuard::new(ENV_JIRA_HOST);

    guard.set("jira.example.com");
    assert_eq!(jira_host_from_env().as_deref(), Some("jira.example.com"));

    guard.set(" ");
    assert_eq!(jira_host_from_env(), None);

    guard.remove();
    assert_eq!(jira_host_from_env(), None);
  }
}
