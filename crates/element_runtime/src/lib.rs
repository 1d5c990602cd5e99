//! Reactive attribute-driven rendering runtime for custom elements.
//!
//! Components declare a property table and a pure render function. The runtime owns each
//! mounted instance: it stores property values, batches renders per microtask checkpoint,
//! diffs render trees, upgrades nested component tags, routes interactions into component
//! handlers, dispatches custom events along the composed path, and runs cancelable timers on
//! a virtual clock.
//!
//! The flow mirrors the page model the components were designed for: attributes and
//! properties flow down, events bubble up, and no state crosses instance boundaries any
//! other way.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod config;
mod conventions;
mod diff;
mod element;
mod registry;
mod runtime;
mod store;
mod style;
mod timers;
mod tree;

pub use config::{ConfigError, EnumPolicy, RuntimeConfig};
pub use conventions::{audit_conventions, ConventionViolation};
pub use diff::{diff, Mutation, NodePath};
pub use element::{Element, ElementContext};
pub use registry::{ElementDefinition, ElementFactory, ElementRegistry, EventDoc, RegistryError};
pub use runtime::{DispatchedEvent, ElementRuntime, InstanceId, ListenerId, RuntimeError};
pub use store::{PropertyChange, PropertyError, PropertyStore};
pub use style::{is_scoped, scope_selector, StyleRule, StyleSheet, ThemeTokens, TokenRef};
pub use timers::TimerHandle;
pub use tree::{
    el, named_slot, slot, text, Action, ElementNode, RenderNode, SlotNode, INSTANCE_ATTRIBUTE,
    PART_ATTRIBUTE, SCOPE_ATTRIBUTE, SLOTTED_ATTRIBUTE,
};

/// Common imports for component crates.
pub mod prelude {
    pub use crate::{
        el, named_slot, slot, text, Action, Element, ElementContext, ElementDefinition,
        ElementNode, PropertyChange, PropertyStore, RenderNode, StyleRule, StyleSheet,
        TimerHandle, TokenRef,
    };
    pub use element_contract::{
        CustomEvent, DomEvent, Interaction, Key, PropKind, PropValue, PropertyDescriptor, TagName,
        Theme, TokenEnum,
    };
}
