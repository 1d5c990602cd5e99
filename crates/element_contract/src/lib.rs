//! Shared contract types between the element runtime and the components it hosts.
//!
//! The contract covers everything a component author and a host page agree on without
//! touching runtime state: validated tag and event names, reactive property descriptors
//! and their attribute conversions, custom-event envelopes, low-level interactions, and
//! the token enums used for visual variants and themes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod event;
mod names;
mod property;
mod token;

use thiserror::Error;

pub use event::{CustomEvent, DomEvent, Interaction, Key};
pub use names::{attribute_name, field_name, is_kebab_case, EventName, TagName};
pub use property::{AttributeBinding, PropKind, PropValue, PropertyDescriptor};
pub use token::{Theme, TokenEnum};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Validation failures for contract names.
pub enum ContractError {
    /// The custom-element tag does not follow the lowercase, hyphenated tag policy.
    #[error("invalid tag name `{0}`; expected lowercase kebab-case with at least one hyphen")]
    InvalidTagName(String),
    /// The event name is not lowercase kebab-case.
    #[error("invalid event name `{0}`; expected lowercase kebab-case")]
    InvalidEventName(String),
}
