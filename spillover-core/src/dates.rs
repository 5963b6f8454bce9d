//! # Date Handling
//!
//! Timestamp parsing for the several formats Jira emits, calendar-date
//! formatting for the report, and the look-back window used to select issues.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::warn;

/// Number of days to look back when nothing else is configured
pub const DEFAULT_DAYS_PRIOR: i64 = 10;

/// Format accepted for user supplied from-dates
const FROM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset-carrying timestamp formats, tried after RFC 3339
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.3f%z", "%Y-%m-%dT%H:%M:%S%z"];

/// UTC timestamp formats written with a literal `Z`
const UTC_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.3fZ", "%Y-%m-%dT%H:%M:%SZ"];

/// Errors raised while resolving the look-back window
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateWindowError {
  #[error("Invalid from date format '{0}': must be yyyy-mm-dd")]
  InvalidFormat(String),
  #[error("From date {0} is in the future")]
  FutureDate(NaiveDate),
}

/// Parse a Jira timestamp. The first format that matches wins.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
    return Some(parsed);
  }

  for format in OFFSET_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
      return Some(parsed);
    }
  }

  for format in UTC_FORMATS {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(parsed.and_utc().fixed_offset());
    }
  }

  NaiveDate::parse_from_str(raw, FROM_DATE_FORMAT)
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|midnight| midnight.and_utc().fixed_offset())
}

/// Reformat a Jira timestamp to `YYYY-MM-DD`, empty when absent or unparseable
pub fn format_calendar_date(raw: Option<&str>) -> String {
  let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
    return String::new();
  };

  match parse_timestamp(raw) {
    Some(parsed) => parsed.format(FROM_DATE_FORMAT).to_string(),
    None => {
      warn!("Error formatting date '{}'", raw);
      String::new()
    }
  }
}

/// Whole days elapsed between `then` and `now`, truncated toward zero
pub fn days_between(then: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
  now.signed_duration_since(then).num_days()
}

/// Strictly parse a `yyyy-mm-dd` from-date
pub fn parse_from_date(raw: &str) -> Result<NaiveDate, DateWindowError> {
  let raw = raw.trim();
  if raw.len() != 10 {
    return Err(DateWindowError::InvalidFormat(raw.to_string()));
  }
  NaiveDate::parse_from_str(raw, FROM_DATE_FORMAT).map_err(|_| DateWindowError::InvalidFormat(raw.to_string()))
}

/// The look-back window for selecting issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
  /// Everything since an absolute calendar date
  Since(NaiveDate),
  /// Everything in the last N days
  DaysPrior(i64),
}

impl DateWindow {
  /// Resolve the window from user input. A from-date takes precedence over a
  /// day count; a missing or non-positive day count falls back to the default.
  pub fn resolve(from_date: Option<&str>, days_prior: Option<i64>) -> Result<Self, DateWindowError> {
    if let Some(raw) = from_date.filter(|raw| !raw.trim().is_empty()) {
      return parse_from_date(raw).map(Self::Since);
    }

    match days_prior {
      Some(days) if days > 0 => Ok(Self::DaysPrior(days)),
      _ => Ok(Self::DaysPrior(DEFAULT_DAYS_PRIOR)),
    }
  }

  /// Convert the window to a day count relative to `now`
  pub fn days_at(&self, now: DateTime<Utc>) -> Result<i64, DateWindowError> {
    match *self {
      Self::DaysPrior(days) => Ok(days),
      Self::Since(date) => {
        let midnight = date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc().fixed_offset());
        let Some(midnight) = midnight else {
          return Err(DateWindowError::InvalidFormat(date.to_string()));
        };
        let days = days_between(midnight, now);
        if days < 0 {
          return Err(DateWindowError::FutureDate(date));
        }
        Ok(days)
      }
    }
  }
}
