//! Component behavior trait and the context handed to its callbacks.

use element_contract::{CustomEvent, Interaction, PropValue};
use leptos::logging;

use crate::store::{PropertyChange, PropertyError, PropertyStore};
use crate::timers::{TimerHandle, TimerQueue};
use crate::tree::{Action, RenderNode};
use crate::InstanceId;

/// Behavior of one component type.
///
/// `render` must be a pure function of the property store. Everything else runs as part of a
/// task: property writes made through the [`ElementContext`] schedule a render, emitted events
/// are dispatched after the callback returns, in emission order.
pub trait Element {
    /// Produces the component's shadow tree from current property values.
    fn render(&self, props: &PropertyStore) -> RenderNode;

    /// Handles a DOM interaction on a node of this component's tree.
    fn handle(&mut self, _ctx: &mut ElementContext<'_>, _action: &Action, _interaction: &Interaction) {
    }

    /// Handles a custom event from a child component this template listens to.
    fn on_child_event(
        &mut self,
        _ctx: &mut ElementContext<'_>,
        _action: &Action,
        _event: &CustomEvent,
    ) {
    }

    /// Runs a due timeout or animation frame.
    fn on_timer(&mut self, _ctx: &mut ElementContext<'_>, _action: &Action) {}

    /// Runs after a render pass with the changes that pass consumed.
    fn updated(&mut self, _ctx: &mut ElementContext<'_>, _changes: &[PropertyChange]) {}

    /// Runs once when the instance leaves the page. Its timers are already cancelled.
    fn disconnected(&mut self) {}
}

/// Mutable view of one instance during a callback.
pub struct ElementContext<'a> {
    id: InstanceId,
    props: &'a mut PropertyStore,
    timers: &'a mut TimerQueue,
    now: u64,
    frame_interval: u64,
    emitted: Vec<CustomEvent>,
}

impl<'a> ElementContext<'a> {
    pub(crate) fn new(
        id: InstanceId,
        props: &'a mut PropertyStore,
        timers: &'a mut TimerQueue,
        now: u64,
        frame_interval: u64,
    ) -> Self {
        Self {
            id,
            props,
            timers,
            now,
            frame_interval,
            emitted: Vec::new(),
        }
    }

    /// Instance being served.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Read access to the property store.
    pub fn props(&self) -> &PropertyStore {
        self.props
    }

    /// Writes a property; a change schedules a render.
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) -> Result<bool, PropertyError> {
        self.props.set(name, value)
    }

    /// Writes a property from inside a behavior, logging a rejected value.
    ///
    /// Returns whether the store accepted the write. Callers skip any event that reports it
    /// when this is `false`.
    pub fn update(&mut self, name: &str, value: impl Into<PropValue>) -> bool {
        match self.props.set(name, value) {
            Ok(_) => true,
            Err(err) => {
                logging::warn!("instance {} rejected write to `{name}`: {err}", self.id);
                false
            }
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queues a custom event for dispatch from this instance.
    pub fn emit(&mut self, event: CustomEvent) {
        self.emitted.push(event);
    }

    /// Schedules `action` after `delay_ms`.
    pub fn set_timeout(&mut self, delay_ms: u64, action: impl Into<Action>) -> TimerHandle {
        self.timers
            .schedule(self.id, self.now.saturating_add(delay_ms), action.into())
    }

    /// Schedules `action` on the next animation frame.
    pub fn request_frame(&mut self, action: impl Into<Action>) -> TimerHandle {
        self.timers
            .schedule(self.id, self.now.saturating_add(self.frame_interval), action.into())
    }

    /// Cancels a pending timer owned by this instance.
    ///
    /// Returns `false` when it already fired, was cancelled, or belongs to another instance.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        handle.owner() == self.id && self.timers.cancel(handle)
    }

    pub(crate) fn into_emitted(self) -> Vec<CustomEvent> {
        self.emitted
    }
}
