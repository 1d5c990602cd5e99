//! Tag names, event names, and the field/attribute naming rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ContractError;

const MAX_NAME_LEN: usize = 64;

/// Custom-element tag such as `sh-badge`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagName(String);

impl TagName {
    /// Returns a tag name when `raw` is lowercase kebab-case containing at least one hyphen.
    pub fn new(raw: impl Into<String>) -> Result<Self, ContractError> {
        let raw = raw.into();
        if is_kebab_case(&raw) && raw.contains('-') {
            Ok(Self(raw))
        } else {
            Err(ContractError::InvalidTagName(raw))
        }
    }

    /// Creates a tag without validation for trusted compile-time constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first hyphen-separated segment (the library prefix).
    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a custom event such as `sh-card-click`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventName(String);

impl EventName {
    /// Returns an event name when `raw` is lowercase kebab-case.
    pub fn new(raw: impl Into<String>) -> Result<Self, ContractError> {
        let raw = raw.into();
        if is_kebab_case(&raw) {
            Ok(Self(raw))
        } else {
            Err(ContractError::InvalidEventName(raw))
        }
    }

    /// Creates an event name without validation for trusted compile-time constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the event name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is kebab-case and namespaced as `prefix-...`.
    ///
    /// This is a static naming contract. Nothing on the dispatch path calls it.
    pub fn is_conventional(&self, prefix: &str) -> bool {
        is_kebab_case(&self.0)
            && self
                .0
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('-'))
                .is_some_and(|rest| !rest.is_empty())
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for EventName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EventName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether `raw` is lowercase kebab-case: ASCII letters and digits in non-empty
/// hyphen-separated segments, starting with a letter.
pub fn is_kebab_case(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > MAX_NAME_LEN {
        return false;
    }

    raw.split('-').enumerate().all(|(index, segment)| {
        let bytes = segment.as_bytes();
        !bytes.is_empty()
            && (index > 0 || bytes[0].is_ascii_lowercase())
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    })
}

/// Converts a property field name to its attribute form.
///
/// Both snake_case (`show_details`) and camelCase (`showDetails`) map to `show-details`.
pub fn attribute_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Converts an attribute name back to the snake_case field form.
pub fn field_name(attribute: &str) -> String {
    attribute.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tag_names_require_a_hyphen_and_lowercase_segments() {
        assert!(TagName::new("sh-badge").is_ok());
        assert!(TagName::new("sh-ia-alert-banner").is_ok());
        assert!(TagName::new("badge").is_err());
        assert!(TagName::new("Sh-badge").is_err());
        assert!(TagName::new("sh--badge").is_err());
        assert!(TagName::new("sh-badge-").is_err());
        assert!(TagName::new("1sh-badge").is_err());
        assert_eq!(TagName::trusted("sh-card").prefix(), "sh");
    }

    #[test]
    fn event_convention_requires_prefix_and_a_following_segment() {
        assert!(EventName::trusted("sh-card-click").is_conventional("sh"));
        assert!(EventName::trusted("sh-search").is_conventional("sh"));
        assert!(!EventName::trusted("sync").is_conventional("sh"));
        assert!(!EventName::trusted("shx-card").is_conventional("sh"));
        assert!(EventName::new("sh_card").is_err());
        assert!(EventName::new("shCardClick").is_err());
    }

    #[test]
    fn field_and_attribute_names_round_trip_through_kebab_case() {
        assert_eq!(attribute_name("show_details"), "show-details");
        assert_eq!(attribute_name("showDetails"), "show-details");
        assert_eq!(attribute_name("pill"), "pill");
        assert_eq!(field_name("trend-value"), "trend_value");
    }
}
