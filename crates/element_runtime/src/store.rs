//! Per-instance reactive property storage with change detection.

use std::collections::BTreeMap;
use std::rc::Rc;

use element_contract::{PropKind, PropValue, PropertyDescriptor, TokenEnum};
use leptos::logging;
use serde_json::Value;
use thiserror::Error;

use crate::config::EnumPolicy;

/// Rejected property writes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyError {
    /// No property with this name is declared.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    /// The value does not match the declared kind.
    #[error("property `{name}` expects {expected:?}, got {value:?}")]
    TypeMismatch {
        /// Property name.
        name: String,
        /// Declared kind.
        expected: PropKind,
        /// Rejected value.
        value: PropValue,
    },
    /// The token is not in the declared enum set (only under [`EnumPolicy::Reject`]).
    #[error("property `{name}` does not accept token `{token}`")]
    UnknownToken {
        /// Property name.
        name: String,
        /// Rejected token.
        token: String,
    },
}

/// One recorded property transition within a render batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// Property name.
    pub name: &'static str,
    /// Value before the first write of the batch.
    pub old: PropValue,
    /// Value after the last write of the batch.
    pub new: PropValue,
}

/// Current values of every declared property of one component instance.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    descriptors: Rc<[PropertyDescriptor]>,
    values: BTreeMap<&'static str, PropValue>,
    changes: Vec<PropertyChange>,
    policy: EnumPolicy,
}

impl PropertyStore {
    /// Creates a store where every property holds its declared default.
    pub fn new(descriptors: Rc<[PropertyDescriptor]>, policy: EnumPolicy) -> Self {
        Self {
            descriptors,
            values: BTreeMap::new(),
            changes: Vec::new(),
            policy,
        }
    }

    /// Declared descriptors.
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Looks up a descriptor by field name.
    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Looks up a descriptor by attribute name.
    pub fn descriptor_for_attribute(&self, attribute: &str) -> Option<&PropertyDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.attribute_name().as_deref() == Some(attribute))
    }

    /// Writes a property.
    ///
    /// Returns `Ok(false)` when the value equals the current one; nothing is recorded and
    /// no render is scheduled. A different value is recorded as a [`PropertyChange`].
    ///
    /// # Errors
    ///
    /// Fails for undeclared names, values of the wrong kind, and (under
    /// [`EnumPolicy::Reject`]) enum tokens outside the declared set.
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) -> Result<bool, PropertyError> {
        let value = value.into();
        let descriptor = self
            .descriptor(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        let kind = descriptor.kind();
        let key = descriptor.name();

        if !kind.accepts(&value) {
            return Err(PropertyError::TypeMismatch {
                name: key.to_string(),
                expected: kind,
                value,
            });
        }
        if self.policy == EnumPolicy::Reject && !kind.is_known_token(&value) {
            return Err(PropertyError::UnknownToken {
                name: key.to_string(),
                token: value.display_text(),
            });
        }

        let current = self.get(key);
        if same_value(&current, &value) {
            return Ok(false);
        }

        match self.changes.iter_mut().find(|change| change.name == key) {
            Some(change) => change.new = value.clone(),
            None => self.changes.push(PropertyChange {
                name: key,
                old: current,
                new: value.clone(),
            }),
        }
        self.values.insert(key, value);
        Ok(true)
    }

    /// Current value, or the declared default when unset. Unknown names read as `Null`.
    pub fn get(&self, name: &str) -> PropValue {
        if let Some(value) = self.values.get(name) {
            return value.clone();
        }
        self.descriptor(name)
            .map(|d| d.default_value().clone())
            .unwrap_or_default()
    }

    /// Display text of a property; empty when unset.
    pub fn text(&self, name: &str) -> String {
        self.get(name).display_text()
    }

    /// Display text of a property, or `None` when unset or empty.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|text| !text.is_empty())
    }

    /// Numeric value of a property, parsing numeric text.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).as_number()
    }

    /// Boolean value of a property; unset reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).as_bool().unwrap_or(false)
    }

    /// List value of a property; unset reads as empty.
    pub fn list(&self, name: &str) -> Vec<Value> {
        match self.get(name) {
            PropValue::List(items) => items,
            _ => Vec::new(),
        }
    }

    /// Token value of a property, falling back to `T::default()` with a warning.
    pub fn token<T: TokenEnum>(&self, name: &str) -> T {
        let value = self.get(name);
        let Some(raw) = value.as_text() else {
            return T::default();
        };
        T::from_token(raw).unwrap_or_else(|| {
            let fallback = T::default();
            logging::warn!(
                "unknown `{name}` token `{raw}`; rendering `{}`",
                fallback.token()
            );
            fallback
        })
    }

    /// Token value of an optional property. Unknown tokens read as unset, with a warning.
    pub fn optional_token<T: TokenEnum>(&self, name: &str) -> Option<T> {
        let raw = self.optional_text(name)?;
        let parsed = T::from_token(&raw);
        if parsed.is_none() {
            logging::warn!("unknown `{name}` token `{raw}`; treating it as unset");
        }
        parsed
    }

    /// Whether writes are waiting for the next render.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Takes the recorded changes of the current batch.
    pub fn take_changes(&mut self) -> Vec<PropertyChange> {
        std::mem::take(&mut self.changes)
    }
}

fn same_value(left: &PropValue, right: &PropValue) -> bool {
    match (left, right) {
        (PropValue::Number(a), PropValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use element_contract::Theme;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn store(policy: EnumPolicy) -> PropertyStore {
        let descriptors: Rc<[PropertyDescriptor]> = vec![
            PropertyDescriptor::text("label", ""),
            PropertyDescriptor::number("count", 0.0),
            PropertyDescriptor::boolean("pill", false),
            PropertyDescriptor::token::<Theme>("theme")
                .attribute("data-theme")
                .reflect(),
            PropertyDescriptor::list("items"),
        ]
        .into();
        PropertyStore::new(descriptors, policy)
    }

    #[test]
    fn equal_writes_record_nothing() {
        let mut store = store(EnumPolicy::Fallback);
        assert_eq!(store.set("pill", false), Ok(false));
        assert_eq!(store.set("theme", "dark"), Ok(false));
        assert!(!store.has_changes());
    }

    #[test]
    fn batched_writes_keep_first_old_and_last_new() {
        let mut store = store(EnumPolicy::Fallback);
        assert_eq!(store.set("count", 1.0), Ok(true));
        assert_eq!(store.set("count", 2.0), Ok(true));
        assert_eq!(store.set("count", 3.0), Ok(true));

        assert_eq!(
            store.take_changes(),
            vec![PropertyChange {
                name: "count",
                old: PropValue::Number(0.0),
                new: PropValue::Number(3.0),
            }]
        );
        assert!(!store.has_changes());
    }

    #[test]
    fn get_never_fails() {
        let store = store(EnumPolicy::Fallback);
        assert_eq!(store.get("missing"), PropValue::Null);
        assert_eq!(store.get("label"), PropValue::from(""));
        assert_eq!(store.list("items"), Vec::<Value>::new());
        assert!(!store.flag("pill"));
    }

    #[test]
    fn writes_are_type_checked() {
        let mut store = store(EnumPolicy::Fallback);
        assert_eq!(
            store.set("nope", 1.0),
            Err(PropertyError::UnknownProperty("nope".to_string()))
        );
        assert!(matches!(
            store.set("pill", "yes"),
            Err(PropertyError::TypeMismatch { .. })
        ));
        assert_eq!(store.set("items", vec![json!({"a": 1})]), Ok(true));
    }

    #[test]
    fn unknown_tokens_fall_back_or_reject_by_policy() {
        let mut lenient = store(EnumPolicy::Fallback);
        assert_eq!(lenient.set("theme", "sepia"), Ok(true));
        assert_eq!(lenient.token::<Theme>("theme"), Theme::Dark);

        let mut strict = store(EnumPolicy::Reject);
        assert_eq!(
            strict.set("theme", "sepia"),
            Err(PropertyError::UnknownToken {
                name: "theme".to_string(),
                token: "sepia".to_string(),
            })
        );
        assert_eq!(strict.set("theme", "light"), Ok(true));
        assert_eq!(strict.token::<Theme>("theme"), Theme::Light);
    }
}
