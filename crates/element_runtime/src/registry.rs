//! Element definitions and the tag registry owned by the application bootstrap.

use std::collections::BTreeMap;
use std::rc::Rc;

use element_contract::{EventName, PropertyDescriptor, TagName};
use thiserror::Error;

use crate::element::Element;
use crate::style::StyleSheet;

/// Constructs a fresh element behavior for a new instance.
pub type ElementFactory = fn() -> Box<dyn Element>;

/// Registration failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A definition for this tag already exists. Definitions are never overwritten.
    #[error("element `{0}` is already defined")]
    AlreadyDefined(TagName),
}

/// Documented event a component may emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDoc {
    /// Event name.
    pub name: EventName,
    /// Shape of the payload.
    pub detail: &'static str,
}

/// Static description of one component type.
#[derive(Clone)]
pub struct ElementDefinition {
    tag: TagName,
    properties: Rc<[PropertyDescriptor]>,
    events: Vec<EventDoc>,
    slots: Vec<Option<&'static str>>,
    styles: StyleSheet,
    factory: ElementFactory,
}

impl std::fmt::Debug for ElementDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementDefinition")
            .field("tag", &self.tag)
            .field("properties", &self.properties)
            .field("events", &self.events)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl ElementDefinition {
    /// Starts a definition for `tag` built by `factory`.
    pub fn new(tag: TagName, factory: ElementFactory) -> Self {
        Self {
            tag,
            properties: Rc::from(Vec::new()),
            events: Vec::new(),
            slots: Vec::new(),
            styles: StyleSheet::default(),
            factory,
        }
    }

    /// Sets the reactive property table.
    pub fn properties(mut self, properties: Vec<PropertyDescriptor>) -> Self {
        self.properties = properties.into();
        self
    }

    /// Documents an emitted event.
    pub fn event(mut self, name: &str, detail: &'static str) -> Self {
        self.events.push(EventDoc {
            name: EventName::trusted(name),
            detail,
        });
        self
    }

    /// Declares the default slot.
    pub fn default_slot(mut self) -> Self {
        self.slots.push(None);
        self
    }

    /// Declares a named slot.
    pub fn slot(mut self, name: &'static str) -> Self {
        self.slots.push(Some(name));
        self
    }

    /// Sets the component stylesheet (written unscoped).
    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Tag name.
    pub fn tag(&self) -> &TagName {
        &self.tag
    }

    /// Property table.
    pub fn property_table(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub(crate) fn shared_properties(&self) -> Rc<[PropertyDescriptor]> {
        Rc::clone(&self.properties)
    }

    /// Documented events.
    pub fn events(&self) -> &[EventDoc] {
        &self.events
    }

    /// Declared slots; `None` is the default slot.
    pub fn slots(&self) -> &[Option<&'static str>] {
        &self.slots
    }

    /// Stylesheet scoped to this tag.
    pub fn scoped_styles(&self) -> StyleSheet {
        self.styles.scoped(self.tag.as_str())
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Element> {
        (self.factory)()
    }
}

/// Maps each tag to exactly one definition.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    definitions: BTreeMap<TagName, ElementDefinition>,
}

impl ElementRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyDefined`] when the tag is taken; the existing
    /// definition is kept.
    pub fn define(&mut self, definition: ElementDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(definition.tag()) {
            return Err(RegistryError::AlreadyDefined(definition.tag().clone()));
        }
        self.definitions
            .insert(definition.tag().clone(), definition);
        Ok(())
    }

    /// Definition for `tag`.
    pub fn get(&self, tag: &str) -> Option<&ElementDefinition> {
        self.definitions.get(&TagName::trusted(tag))
    }

    /// Whether `tag` is defined.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Defined tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &TagName> {
        self.definitions.keys()
    }

    /// Every definition in tag order.
    pub fn definitions(&self) -> impl Iterator<Item = &ElementDefinition> {
        self.definitions.values()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Concatenated scoped CSS of every definition.
    pub fn stylesheet(&self) -> String {
        self.definitions
            .values()
            .map(|definition| definition.scoped_styles().to_css())
            .collect()
    }
}
