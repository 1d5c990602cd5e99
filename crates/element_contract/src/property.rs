//! Reactive property descriptors, values, and attribute conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::names::attribute_name;
use crate::token::TokenEnum;

/// Current value of a reactive property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Unset or explicitly cleared.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// String or enum token.
    Text(String),
    /// Array of plain JSON objects.
    List(Vec<Value>),
}

impl PropValue {
    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric payload, parsing numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value is [`PropValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text used when the value is interpolated into rendered output.
    ///
    /// Integral numbers render without a fractional part; `Null` renders empty.
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(text) => text.clone(),
            Self::List(items) => Value::Array(items.clone()).to_string(),
        }
    }

    /// Plain JSON form used in event payloads.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(text) => Value::String(text.clone()),
            Self::List(items) => Value::Array(items.clone()),
        }
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<Value>> for PropValue {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

/// Declared value type of a reactive property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// Free text. Numbers are accepted and rendered as text.
    Text,
    /// Number.
    Number,
    /// Boolean with presence-means-true attribute semantics.
    Boolean,
    /// Closed set of text tokens.
    Enum(&'static [&'static str]),
    /// Array of plain objects.
    List,
}

impl PropKind {
    /// Whether `value` has a shape this kind stores. `Null` is always accepted.
    ///
    /// Enum kinds accept any text: unknown tokens fall back when rendered.
    pub fn accepts(self, value: &PropValue) -> bool {
        match (self, value) {
            (_, PropValue::Null) => true,
            (Self::Text, PropValue::Text(_) | PropValue::Number(_)) => true,
            (Self::Enum(_), PropValue::Text(_)) => true,
            (Self::Number, PropValue::Number(_)) => true,
            (Self::Boolean, PropValue::Bool(_)) => true,
            (Self::List, PropValue::List(_)) => true,
            _ => false,
        }
    }

    /// Whether an enum value is one of the declared tokens. Non-enum kinds always pass.
    pub fn is_known_token(self, value: &PropValue) -> bool {
        match (self, value) {
            (Self::Enum(tokens), PropValue::Text(text)) => tokens.contains(&text.as_str()),
            _ => true,
        }
    }

    /// Converts a raw attribute into a property value.
    ///
    /// Booleans follow presence semantics. A missing attribute on any other kind restores
    /// `default`. Unparseable numbers and lists become `Null`.
    pub fn from_attribute(self, raw: Option<&str>, default: &PropValue) -> PropValue {
        match (self, raw) {
            (Self::Boolean, raw) => PropValue::Bool(raw.is_some()),
            (_, None) => default.clone(),
            (Self::Text | Self::Enum(_), Some(raw)) => PropValue::Text(raw.to_string()),
            (Self::Number, Some(raw)) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(PropValue::Number)
                .unwrap_or(PropValue::Null),
            (Self::List, Some(raw)) => serde_json::from_str::<Vec<Value>>(raw)
                .map(PropValue::List)
                .unwrap_or(PropValue::Null),
        }
    }

    /// Converts a property value into its reflected attribute form; `None` removes it.
    pub fn to_attribute(self, value: &PropValue) -> Option<String> {
        match value {
            PropValue::Null | PropValue::Bool(false) => None,
            PropValue::Bool(true) => Some(String::new()),
            other => Some(other.display_text()),
        }
    }
}

/// How a property maps onto a host attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeBinding {
    /// Kebab-case form of the field name.
    Derived,
    /// Explicit attribute name (for example `data-theme`).
    Named(&'static str),
    /// Internal state with no attribute.
    Internal,
}

/// Static description of one reactive property of a component type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: PropKind,
    default: PropValue,
    binding: AttributeBinding,
    reflect: bool,
}

impl PropertyDescriptor {
    fn new(name: &'static str, kind: PropKind, default: PropValue) -> Self {
        Self {
            name,
            kind,
            default,
            binding: AttributeBinding::Derived,
            reflect: false,
        }
    }

    /// Text property.
    pub fn text(name: &'static str, default: &str) -> Self {
        Self::new(name, PropKind::Text, PropValue::from(default))
    }

    /// Text property that defaults to unset.
    pub fn optional_text(name: &'static str) -> Self {
        Self::new(name, PropKind::Text, PropValue::Null)
    }

    /// Numeric property.
    pub fn number(name: &'static str, default: f64) -> Self {
        Self::new(name, PropKind::Number, PropValue::Number(default))
    }

    /// Numeric property that defaults to unset.
    pub fn optional_number(name: &'static str) -> Self {
        Self::new(name, PropKind::Number, PropValue::Null)
    }

    /// Boolean property.
    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self::new(name, PropKind::Boolean, PropValue::Bool(default))
    }

    /// Enum property backed by a [`TokenEnum`], defaulting to its `Default` variant.
    pub fn token<T: TokenEnum>(name: &'static str) -> Self {
        Self::new(
            name,
            PropKind::Enum(T::TOKENS),
            PropValue::from(T::default().token()),
        )
    }

    /// Enum property that defaults to unset.
    pub fn optional_token<T: TokenEnum>(name: &'static str) -> Self {
        Self::new(name, PropKind::Enum(T::TOKENS), PropValue::Null)
    }

    /// List property defaulting to an empty array.
    pub fn list(name: &'static str) -> Self {
        Self::new(name, PropKind::List, PropValue::List(Vec::new()))
    }

    /// Internal reactive state with no attribute binding.
    pub fn state(name: &'static str, kind: PropKind, default: PropValue) -> Self {
        Self {
            binding: AttributeBinding::Internal,
            ..Self::new(name, kind, default)
        }
    }

    /// Overrides the attribute name.
    pub fn attribute(mut self, attribute: &'static str) -> Self {
        self.binding = AttributeBinding::Named(attribute);
        self
    }

    /// Reflects property writes back onto the host attribute.
    pub fn reflect(mut self) -> Self {
        self.reflect = true;
        self
    }

    /// Field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> PropKind {
        self.kind
    }

    /// Declared default value.
    pub fn default_value(&self) -> &PropValue {
        &self.default
    }

    /// Attribute binding.
    pub fn binding(&self) -> AttributeBinding {
        self.binding
    }

    /// Whether writes reflect to the host attribute.
    pub fn reflects(&self) -> bool {
        self.reflect && self.binding != AttributeBinding::Internal
    }

    /// Attribute name for this property, if it has one.
    pub fn attribute_name(&self) -> Option<String> {
        match self.binding {
            AttributeBinding::Derived => Some(attribute_name(self.name)),
            AttributeBinding::Named(name) => Some(name.to_string()),
            AttributeBinding::Internal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::Theme;

    #[test]
    fn boolean_attributes_use_presence_semantics() {
        let kind = PropKind::Boolean;
        let default = PropValue::Bool(true);
        assert_eq!(kind.from_attribute(Some(""), &default), PropValue::Bool(true));
        assert_eq!(kind.from_attribute(Some("false"), &default), PropValue::Bool(true));
        assert_eq!(kind.from_attribute(None, &default), PropValue::Bool(false));
        assert_eq!(kind.to_attribute(&PropValue::Bool(true)), Some(String::new()));
        assert_eq!(kind.to_attribute(&PropValue::Bool(false)), None);
    }

    #[test]
    fn numeric_and_list_attributes_parse_or_clear() {
        let default = PropValue::Number(0.0);
        assert_eq!(
            PropKind::Number.from_attribute(Some(" 300 "), &default),
            PropValue::Number(300.0)
        );
        assert_eq!(
            PropKind::Number.from_attribute(Some("soon"), &default),
            PropValue::Null
        );
        assert_eq!(PropKind::Number.from_attribute(None, &default), default);
        assert_eq!(
            PropKind::List.from_attribute(Some(r#"[{"label":"Home"}]"#), &PropValue::Null),
            PropValue::List(vec![json!({"label": "Home"})])
        );
        assert_eq!(
            PropKind::List.from_attribute(Some("{oops"), &PropValue::Null),
            PropValue::Null
        );
    }

    #[test]
    fn enum_kind_accepts_unknown_tokens_but_reports_them() {
        let descriptor = PropertyDescriptor::token::<Theme>("theme").attribute("data-theme");
        let unknown = PropValue::from("sepia");
        assert!(descriptor.kind().accepts(&unknown));
        assert!(!descriptor.kind().is_known_token(&unknown));
        assert!(descriptor.kind().is_known_token(&PropValue::from("light")));
        assert_eq!(descriptor.default_value(), &PropValue::from("dark"));
        assert_eq!(descriptor.attribute_name().as_deref(), Some("data-theme"));
    }

    #[test]
    fn kinds_reject_mismatched_shapes() {
        assert!(!PropKind::Boolean.accepts(&PropValue::from("yes")));
        assert!(!PropKind::Number.accepts(&PropValue::from(true)));
        assert!(PropKind::Text.accepts(&PropValue::Number(15.0)));
        assert!(PropKind::List.accepts(&PropValue::Null));
    }

    #[test]
    fn display_text_drops_integral_fractions() {
        assert_eq!(PropValue::Number(156.0).display_text(), "156");
        assert_eq!(PropValue::Number(2.5).display_text(), "2.5");
        assert_eq!(PropValue::Null.display_text(), "");
    }

    #[test]
    fn internal_state_has_no_attribute() {
        let descriptor =
            PropertyDescriptor::state("display_value", PropKind::Number, PropValue::Null);
        assert_eq!(descriptor.attribute_name(), None);
        assert!(!descriptor.reflect().reflects());
    }
}
