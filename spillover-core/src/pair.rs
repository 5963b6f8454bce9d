//! # Pair Field Decoder
//!
//! Decodes the optional, deployment-specific "pair" custom field. Depending on
//! how the field was configured in Jira it holds user pickers (single or
//! multi) or free text (single or multi).

use serde::Deserialize;
use serde_json::Value;

/// A user-picker entry carrying a display name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairPerson {
  #[serde(rename = "displayName")]
  pub display_name: String,
}

/// The decoded shape of a pair field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairField {
  /// Multi user picker
  People(Vec<PairPerson>),
  /// Single user picker
  Person(PairPerson),
  /// Multi-value text
  Names(Vec<String>),
  /// Single text value
  Name(String),
  /// Missing, `null`, or any other shape
  Unrecognized,
}

impl PairField {
  /// Decode a raw field value, trying each interpretation in order
  pub fn decode(value: Option<&Value>) -> Self {
    let Some(value) = value.filter(|value| !value.is_null()) else {
      return Self::Unrecognized;
    };

    if let Ok(people) = Vec::<PairPerson>::deserialize(value) {
      return Self::People(people);
    }
    if let Ok(person) = PairPerson::deserialize(value) {
      return Self::Person(person);
    }
    if let Ok(names) = Vec::<String>::deserialize(value) {
      return Self::Names(names);
    }
    if let Ok(name) = String::deserialize(value) {
      return Self::Name(name);
    }

    Self::Unrecognized
  }

  /// Render the decoded value as a `", "` separated list
  pub fn display(&self) -> String {
    let names: Vec<&str> = match self {
      Self::People(people) => people.iter().map(|person| person.display_name.as_str()).collect(),
      Self::Person(person) => vec![person.display_name.as_str()],
      Self::Names(names) => names.iter().map(String::as_str).collect(),
      Self::Name(name) => vec![name.as_str()],
      Self::Unrecognized => Vec::new(),
    };

    names
      .into_iter()
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .collect::<Vec<_>>()
      .join(", ")
  }
}

/// Resolve a raw pair field value to its display text, empty when nothing fits
pub fn resolve_pair_value(value: Option<&Value>) -> String {
  PairField::decode(value).display()
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use test_case::test_case;

  use super::*;

  #[test_case(json!([{"displayName": "Alice"}, {"displayName": "Bob"}]), "Alice, Bob" ; "user list")]
  #[test_case(json!({"displayName": "Carol", "accountId": "abc"}), "Carol" ; "single user")]
  #[test_case(json!(["Alice", "Bob"]), "Alice, Bob" ; "string list")]
  #[test_case(json!("Dana"), "Dana" ; "single string")]
  #[test_case(json!({}), "" ; "object without display name")]
  #[test_case(json!(17), "" ; "number")]
  #[test_case(json!(null), "" ; "null")]
  #[test_case(json!([]), "" ; "empty list")]
  fn test_resolve_pair_value(value: Value, expected: &str) {
    assert_eq!(resolve_pair_value(Some(&value)), expected);
  }

  #[test]
  fn test_absent_value_is_empty() {
    assert_eq!(resolve_pair_value(None), "");
    assert_eq!(PairField::decode(None), PairField::Unrecognized);
  }

  #[test]
  fn test_user_list_wins_over_string_list() {
    let value = json!([{"displayName": "Eve"}]);

    assert_eq!(
      PairField::decode(Some(&value)),
      PairField::People(vec![PairPerson {
        display_name: "Eve".to_string()
      }])
    );
  }

  #[test]
  fn test_blank_names_are_skipped() {
    let value = json!(["Alice", "  ", ""]);

    assert_eq!(resolve_pair_value(Some(&value)), "Alice");
  }
}
