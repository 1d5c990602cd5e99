//! Custom-event envelopes and the low-level interactions that produce them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::names::EventName;

/// Named message dispatched from a component to ancestor listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    /// Event name.
    pub name: EventName,
    /// Plain JSON payload.
    pub detail: Value,
    /// Whether the event climbs past its target.
    pub bubbles: bool,
    /// Whether the event may leave the emitting component's shadow scope.
    pub composed: bool,
    /// Whether listeners may cancel the default action.
    pub cancelable: bool,
    default_prevented: bool,
}

impl CustomEvent {
    /// Bubbling, composed event. This is the default shape for every library event.
    pub fn new(name: &str, detail: Value) -> Self {
        Self::named(EventName::trusted(name), detail)
    }

    /// Bubbling, composed event with an already validated name.
    pub fn named(name: EventName, detail: Value) -> Self {
        Self {
            name,
            detail,
            bubbles: true,
            composed: true,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// Restricts the event to its target: no bubbling, no shadow crossing.
    pub fn local(mut self) -> Self {
        self.bubbles = false;
        self.composed = false;
        self
    }

    /// Bubbles within the emitting scope but does not cross its shadow boundary.
    pub fn uncomposed(mut self) -> Self {
        self.composed = false;
        self
    }

    /// Marks the event as cancelable.
    pub fn cancelable(mut self) -> Self {
        self.cancelable = true;
        self
    }

    /// Cancels the default action. Ignored unless the event is cancelable.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether a listener cancelled the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// DOM event families components may attach handlers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DomEvent {
    /// Pointer activation.
    Click,
    /// Key press.
    KeyDown,
    /// Text entry.
    Input,
    /// Focus gained.
    Focus,
    /// Focus lost.
    Blur,
}

impl DomEvent {
    /// Returns the DOM event type string.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Input => "input",
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }
}

/// Keyboard key relevant to activation handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Any other key, by its DOM `key` value.
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(raw: &str) -> Self {
        match raw {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the key activates a clickable affordance.
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Low-level user interaction delivered to a component node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer click.
    Click,
    /// Key press.
    KeyDown(Key),
    /// Input with the node's new value.
    Input(String),
    /// Focus gained.
    Focus,
    /// Focus lost.
    Blur,
}

impl Interaction {
    /// DOM event family this interaction belongs to.
    pub fn dom_event(&self) -> DomEvent {
        match self {
            Self::Click => DomEvent::Click,
            Self::KeyDown(_) => DomEvent::KeyDown,
            Self::Input(_) => DomEvent::Input,
            Self::Focus => DomEvent::Focus,
            Self::Blur => DomEvent::Blur,
        }
    }

    /// Pressed key, for keyboard interactions.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::KeyDown(key) => Some(key),
            _ => None,
        }
    }

    /// Text payload, for input interactions.
    pub fn input_value(&self) -> Option<&str> {
        match self {
            Self::Input(value) => Some(value),
            _ => None,
        }
    }
}
