//! Instance lifecycle, render scheduling, event dispatch, and the virtual clock.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use element_contract::{CustomEvent, DomEvent, Interaction, Key, PropValue, TagName};
use leptos::logging;
use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::conventions::{audit_conventions, ConventionViolation};
use crate::diff::{diff, NodePath};
use crate::element::{Element, ElementContext};
use crate::registry::ElementRegistry;
use crate::store::{PropertyChange, PropertyError, PropertyStore};
use crate::style::ThemeTokens;
use crate::timers::{TimerHandle, TimerQueue};
use crate::tree::{ElementNode, RenderNode, INSTANCE_ATTRIBUTE};

/// Identity of one mounted component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = ParseIntError;

    /// Parses the decimal form written into `data-instance` attributes.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim().parse().map(Self)
    }
}

/// Handle returned by listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Runtime operation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// The instance was removed or never existed.
    #[error("instance {0} is not connected")]
    UnknownInstance(InstanceId),
    /// No definition is registered for the tag.
    #[error("element `{0}` is not defined")]
    UnknownElement(String),
    /// The instance has no rendered node with this `data-part`.
    #[error("instance {instance} has no part `{part}`")]
    UnknownPart {
        /// Instance searched.
        instance: InstanceId,
        /// Missing part name.
        part: String,
    },
    /// A property write was rejected.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Event that reached the document.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedEvent {
    /// Instance the event was emitted from.
    pub target: InstanceId,
    /// Event as seen by document listeners.
    pub event: CustomEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
    Instance(InstanceId),
    Document,
}

struct Listener {
    id: ListenerId,
    target: ListenerTarget,
    event: String,
    callback: Box<dyn FnMut(&mut CustomEvent)>,
}

struct Instance {
    tag: TagName,
    element: Box<dyn Element>,
    props: PropertyStore,
    attributes: BTreeMap<String, String>,
    template_attributes: BTreeMap<String, String>,
    template_properties: BTreeMap<String, PropValue>,
    pending: bool,
    tree: Option<RenderNode>,
    render_count: usize,
    mutation_count: usize,
    parent: Option<InstanceId>,
    host_path: NodePath,
    children: BTreeMap<NodePath, InstanceId>,
    light: Vec<RenderNode>,
}

struct Projection<'a> {
    owner: Option<InstanceId>,
    light: &'a [RenderNode],
    base: NodePath,
    outer: Option<&'a Projection<'a>>,
}

/// Hosts component instances on a single cooperative thread.
///
/// Host-script writes (`set_property`, `set_attribute`) only schedule renders; call
/// [`flush`](Self::flush) to run the microtask checkpoint. Interactions and timer callbacks
/// are tasks and flush on their own.
pub struct ElementRuntime {
    registry: ElementRegistry,
    config: RuntimeConfig,
    instances: BTreeMap<InstanceId, Instance>,
    roots: Vec<InstanceId>,
    next_instance: u64,
    microtasks: VecDeque<InstanceId>,
    timers: TimerQueue,
    clock: u64,
    listeners: Vec<Listener>,
    next_listener: u64,
    document_log: Vec<DispatchedEvent>,
    tokens: ThemeTokens,
}

impl ElementRuntime {
    /// Runtime with default configuration.
    pub fn new(registry: ElementRegistry) -> Self {
        Self::with_config(registry, RuntimeConfig::default())
    }

    /// Runtime with explicit configuration.
    pub fn with_config(registry: ElementRegistry, config: RuntimeConfig) -> Self {
        Self {
            registry,
            config,
            instances: BTreeMap::new(),
            roots: Vec::new(),
            next_instance: 1,
            microtasks: VecDeque::new(),
            timers: TimerQueue::default(),
            clock: 0,
            listeners: Vec::new(),
            next_listener: 1,
            document_log: Vec::new(),
            tokens: ThemeTokens::default(),
        }
    }

    /// Registered definitions.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.clock
    }

    /// Page-level token values.
    pub fn theme_tokens(&self) -> &ThemeTokens {
        &self.tokens
    }

    /// Replaces the page-level token values.
    pub fn set_theme_tokens(&mut self, tokens: ThemeTokens) {
        self.tokens = tokens;
    }

    /// Page stylesheet: token definitions followed by every scoped component sheet.
    pub fn stylesheet(&self) -> String {
        let mut css = self.tokens.to_css();
        css.push_str(&self.registry.stylesheet());
        css
    }

    /// Naming-convention violations of the registered definitions under the configured
    /// prefix.
    pub fn audit(&self) -> Vec<ConventionViolation> {
        audit_conventions(&self.registry, &self.config.event_prefix)
    }

    /// Inserts a top-level instance of `tag` into the page and queues its first render.
    pub fn create_element(&mut self, tag: &str) -> Result<InstanceId, RuntimeError> {
        let id = self.spawn(tag, None, Vec::new())?;
        self.roots.push(id);
        Ok(id)
    }

    /// Removes an instance and its whole subtree.
    ///
    /// Every timer and frame owned by the subtree is cancelled before `disconnected` runs,
    /// and listeners targeting removed instances are dropped.
    pub fn remove_element(&mut self, id: InstanceId) -> Result<(), RuntimeError> {
        let parent = self.instance(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.instances.get_mut(&p)) {
            parent.children.retain(|_, child| *child != id);
        }
        self.roots.retain(|root| *root != id);
        self.disconnect(id);
        Ok(())
    }

    /// Whether the instance is still on the page.
    pub fn is_connected(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Top-level instances in insertion order.
    pub fn roots(&self) -> &[InstanceId] {
        &self.roots
    }

    /// Tag of an instance.
    pub fn tag(&self, id: InstanceId) -> Result<&TagName, RuntimeError> {
        Ok(&self.instance(id)?.tag)
    }

    /// Writes a property from host script. Schedules a render on change; does not flush.
    pub fn set_property(
        &mut self,
        id: InstanceId,
        name: &str,
        value: impl Into<PropValue>,
    ) -> Result<bool, RuntimeError> {
        let changed = self.instance_mut(id)?.props.set(name, value)?;
        self.sync_pending(id);
        Ok(changed)
    }

    /// Reads a property. Unknown names read as `Null`.
    pub fn property(&self, id: InstanceId, name: &str) -> Result<PropValue, RuntimeError> {
        Ok(self.instance(id)?.props.get(name))
    }

    /// Read access to an instance's property store.
    pub fn props(&self, id: InstanceId) -> Result<&PropertyStore, RuntimeError> {
        Ok(&self.instance(id)?.props)
    }

    /// Sets a host attribute, converting it into the matching property when one is declared.
    pub fn set_attribute(
        &mut self,
        id: InstanceId,
        name: &str,
        value: &str,
    ) -> Result<(), RuntimeError> {
        self.apply_attribute(id, name, Some(value))
    }

    /// Removes a host attribute. Booleans become `false`; other kinds restore their default.
    pub fn remove_attribute(&mut self, id: InstanceId, name: &str) -> Result<(), RuntimeError> {
        self.apply_attribute(id, name, None)
    }

    /// Current host attribute value.
    pub fn attribute(&self, id: InstanceId, name: &str) -> Result<Option<&str>, RuntimeError> {
        Ok(self.instance(id)?.attributes.get(name).map(String::as_str))
    }

    /// Every host attribute in name order.
    pub fn attributes(&self, id: InstanceId) -> Result<Vec<(&str, &str)>, RuntimeError> {
        Ok(self
            .instance(id)?
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect())
    }

    /// Replaces the light-DOM content a top-level host page places inside the instance.
    pub fn set_light_content(
        &mut self,
        id: InstanceId,
        content: Vec<RenderNode>,
    ) -> Result<(), RuntimeError> {
        self.instance_mut(id)?.light = content;
        Ok(())
    }

    /// Queues a render unless one is already pending.
    pub fn request_render(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            if !instance.pending {
                instance.pending = true;
                self.microtasks.push_back(id);
            }
        }
    }

    /// Whether a render is queued for the instance.
    pub fn is_render_pending(&self, id: InstanceId) -> Result<bool, RuntimeError> {
        Ok(self.instance(id)?.pending)
    }

    /// Runs queued renders until the queue drains. Returns the number of render passes.
    ///
    /// Writes made while rendering (in `updated` or by child reconciliation) re-queue their
    /// instance and are rendered in the same checkpoint. Past `max_render_passes` the rest of
    /// the queue stays pending for the next flush.
    pub fn flush(&mut self) -> usize {
        let mut passes = 0;
        while let Some(id) = self.microtasks.pop_front() {
            if passes >= self.config.max_render_passes {
                logging::warn!(
                    "render pass limit of {} reached; deferring {} queued renders",
                    self.config.max_render_passes,
                    self.microtasks.len() + 1
                );
                self.microtasks.push_front(id);
                break;
            }
            if self.render(id) {
                passes += 1;
            }
        }
        passes
    }

    /// Latest render tree of an instance (`None` before the first flush).
    pub fn tree(&self, id: InstanceId) -> Result<Option<&RenderNode>, RuntimeError> {
        Ok(self.instance(id)?.tree.as_ref())
    }

    /// Rendered node of an instance's own tree carrying `data-part="part"`.
    pub fn part(&self, id: InstanceId, part: &str) -> Result<&ElementNode, RuntimeError> {
        self.instance(id)?
            .tree
            .as_ref()
            .and_then(|tree| tree.find_part(part))
            .ok_or_else(|| RuntimeError::UnknownPart {
                instance: id,
                part: part.to_string(),
            })
    }

    /// Number of completed render passes.
    pub fn render_count(&self, id: InstanceId) -> Result<usize, RuntimeError> {
        Ok(self.instance(id)?.render_count)
    }

    /// Number of DOM mutations applied across all renders (the first render counts one).
    pub fn mutation_count(&self, id: InstanceId) -> Result<usize, RuntimeError> {
        Ok(self.instance(id)?.mutation_count)
    }

    /// Child component instances in tree order.
    pub fn children(&self, id: InstanceId) -> Result<Vec<InstanceId>, RuntimeError> {
        Ok(self.instance(id)?.children.values().copied().collect())
    }

    /// Owning instance, for nested components.
    pub fn parent(&self, id: InstanceId) -> Result<Option<InstanceId>, RuntimeError> {
        Ok(self.instance(id)?.parent)
    }

    /// First instance with `tag` below `id`, depth first.
    pub fn find_descendant(&self, id: InstanceId, tag: &str) -> Option<InstanceId> {
        let instance = self.instances.get(&id)?;
        instance.children.values().find_map(|child| {
            match self.instances.get(child) {
                Some(found) if found.tag.as_str() == tag => Some(*child),
                _ => self.find_descendant(*child, tag),
            }
        })
    }

    /// Flattened tree: child component trees inlined under their host nodes and slot content
    /// projected (or fallback content when nothing is assigned).
    pub fn composed_tree(&self, id: InstanceId) -> Result<RenderNode, RuntimeError> {
        let instance = self.instance(id)?;
        let projection = Projection {
            owner: instance.parent,
            light: &instance.light,
            base: instance.host_path.clone(),
            outer: None,
        };
        Ok(self.compose_host(id, &projection))
    }

    /// Delivers a user interaction to the node carrying `data-part="part"`.
    ///
    /// Returns whether a handler ran. A `disabled` attribute on the node blocks the
    /// interaction, like a native disabled control. Enter or Space on a `button` node with no
    /// keydown handler runs its click handler.
    pub fn interact(
        &mut self,
        id: InstanceId,
        part: &str,
        interaction: Interaction,
    ) -> Result<bool, RuntimeError> {
        let node = self.part(id, part)?;
        if node.attribute("disabled").is_some() {
            return Ok(false);
        }

        let resolved = match node.handler(interaction.dom_event()) {
            Some(action) => Some((action.clone(), interaction)),
            None => match &interaction {
                Interaction::KeyDown(key) if key.is_activation() && node.tag == "button" => node
                    .handler(DomEvent::Click)
                    .map(|action| (action.clone(), Interaction::Click)),
                _ => None,
            },
        };
        let Some((action, interaction)) = resolved else {
            return Ok(false);
        };

        let emitted = self.run_callback(id, |element, ctx| {
            element.handle(ctx, &action, &interaction)
        });
        self.dispatch_all(id, emitted);
        self.flush();
        Ok(true)
    }

    /// Pointer click on a part.
    pub fn click(&mut self, id: InstanceId, part: &str) -> Result<bool, RuntimeError> {
        self.interact(id, part, Interaction::Click)
    }

    /// Key press on a part.
    pub fn key_down(&mut self, id: InstanceId, part: &str, key: Key) -> Result<bool, RuntimeError> {
        self.interact(id, part, Interaction::KeyDown(key))
    }

    /// Text input on a part.
    pub fn input(
        &mut self,
        id: InstanceId,
        part: &str,
        value: impl Into<String>,
    ) -> Result<bool, RuntimeError> {
        self.interact(id, part, Interaction::Input(value.into()))
    }

    /// Focus on a part.
    pub fn focus(&mut self, id: InstanceId, part: &str) -> Result<bool, RuntimeError> {
        self.interact(id, part, Interaction::Focus)
    }

    /// Blur on a part.
    pub fn blur(&mut self, id: InstanceId, part: &str) -> Result<bool, RuntimeError> {
        self.interact(id, part, Interaction::Blur)
    }

    /// Advances the virtual clock, firing due timers in order. Each timer runs as a task.
    pub fn advance(&mut self, ms: u64) {
        self.flush();
        let target = self.clock.saturating_add(ms);
        while let Some((due, timer)) = self.timers.pop_due(target) {
            self.clock = self.clock.max(due);
            let owner = timer.handle.owner();
            let emitted =
                self.run_callback(owner, |element, ctx| element.on_timer(ctx, &timer.action));
            self.dispatch_all(owner, emitted);
            self.flush();
        }
        self.clock = target;
    }

    /// Pending timers and frames owned by an instance.
    pub fn pending_timers(&self, id: InstanceId) -> usize {
        self.timers.pending_for(id)
    }

    /// Pending timers and frames across the page.
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Whether a timer handle is still waiting to fire.
    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.timers.is_pending(handle)
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Listens for `event` dispatched on a top-level instance (or passing its host).
    pub fn add_event_listener(
        &mut self,
        id: InstanceId,
        event: &str,
        callback: impl FnMut(&mut CustomEvent) + 'static,
    ) -> Result<ListenerId, RuntimeError> {
        self.instance(id)?;
        Ok(self.push_listener(ListenerTarget::Instance(id), event, Box::new(callback)))
    }

    /// Listens for `event` reaching the document.
    pub fn add_document_listener(
        &mut self,
        event: &str,
        callback: impl FnMut(&mut CustomEvent) + 'static,
    ) -> ListenerId {
        self.push_listener(ListenerTarget::Document, event, Box::new(callback))
    }

    /// Removes a listener. Returns whether it existed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        before != self.listeners.len()
    }

    /// Takes the events that reached the document since the last call.
    pub fn drain_events(&mut self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.document_log)
    }

    fn instance(&self, id: InstanceId) -> Result<&Instance, RuntimeError> {
        self.instances
            .get(&id)
            .ok_or(RuntimeError::UnknownInstance(id))
    }

    fn instance_mut(&mut self, id: InstanceId) -> Result<&mut Instance, RuntimeError> {
        self.instances
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownInstance(id))
    }

    fn spawn(
        &mut self,
        tag: &str,
        parent: Option<InstanceId>,
        host_path: NodePath,
    ) -> Result<InstanceId, RuntimeError> {
        let definition = self
            .registry
            .get(tag)
            .ok_or_else(|| RuntimeError::UnknownElement(tag.to_string()))?;
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;

        let instance = Instance {
            tag: definition.tag().clone(),
            element: definition.instantiate(),
            props: PropertyStore::new(definition.shared_properties(), self.config.enum_policy),
            attributes: BTreeMap::new(),
            template_attributes: BTreeMap::new(),
            template_properties: BTreeMap::new(),
            pending: false,
            tree: None,
            render_count: 0,
            mutation_count: 0,
            parent,
            host_path,
            children: BTreeMap::new(),
            light: Vec::new(),
        };
        self.instances.insert(id, instance);
        self.request_render(id);
        Ok(id)
    }

    fn disconnect(&mut self, id: InstanceId) {
        let Some(mut instance) = self.instances.remove(&id) else {
            return;
        };
        for child in instance.children.values() {
            self.disconnect(*child);
        }
        self.timers.cancel_owner(id);
        instance.element.disconnected();
        self.microtasks.retain(|queued| *queued != id);
        self.listeners
            .retain(|listener| listener.target != ListenerTarget::Instance(id));
    }

    fn sync_pending(&mut self, id: InstanceId) {
        let has_changes = self
            .instances
            .get(&id)
            .is_some_and(|instance| instance.props.has_changes());
        if has_changes {
            self.request_render(id);
        }
    }

    fn apply_attribute(
        &mut self,
        id: InstanceId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), RuntimeError> {
        let instance = self.instance_mut(id)?;
        let written = match instance.props.descriptor_for_attribute(name) {
            Some(descriptor) => {
                let field = descriptor.name();
                let converted = descriptor
                    .kind()
                    .from_attribute(value, descriptor.default_value());
                instance.props.set(field, converted)?;
                true
            }
            None => false,
        };
        match value {
            Some(value) => {
                instance
                    .attributes
                    .insert(name.to_string(), value.to_string());
            }
            None => {
                instance.attributes.remove(name);
            }
        }

        if written {
            self.sync_pending(id);
        }
        Ok(())
    }

    fn run_callback<F>(&mut self, id: InstanceId, callback: F) -> Vec<CustomEvent>
    where
        F: FnOnce(&mut dyn Element, &mut ElementContext<'_>),
    {
        let Some(instance) = self.instances.get_mut(&id) else {
            return Vec::new();
        };
        let mut ctx = ElementContext::new(
            id,
            &mut instance.props,
            &mut self.timers,
            self.clock,
            self.config.frame_interval_ms,
        );
        callback(instance.element.as_mut(), &mut ctx);
        let emitted = ctx.into_emitted();
        self.sync_pending(id);
        emitted
    }

    fn render(&mut self, id: InstanceId) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        if !instance.pending {
            return false;
        }
        instance.pending = false;

        let first = instance.tree.is_none();
        let changes = instance.props.take_changes();
        reflect_properties(&instance.props, &mut instance.attributes, &changes, first);

        let mut tree = instance.element.render(&instance.props);
        tree.stamp_scope(instance.tag.as_str());
        instance.mutation_count += match &instance.tree {
            Some(previous) => diff(previous, &tree).len(),
            None => 1,
        };
        instance.render_count += 1;
        instance.tree = Some(tree);

        self.reconcile_children(id);
        let emitted = self.run_callback(id, |element, ctx| element.updated(ctx, &changes));
        self.dispatch_all(id, emitted);
        true
    }

    fn reconcile_children(&mut self, id: InstanceId) {
        let Some(instance) = self.instances.get_mut(&id) else {
            return;
        };
        let Some(tree) = instance.tree.clone() else {
            return;
        };
        let mut previous = std::mem::take(&mut instance.children);

        let mut found = Vec::new();
        collect_components(&self.registry, &tree, &mut Vec::new(), &mut found);

        let mut next = BTreeMap::new();
        for (path, node) in found {
            let reusable = match previous.remove(&path) {
                Some(existing) => {
                    let same_tag = self
                        .instances
                        .get(&existing)
                        .is_some_and(|child| child.tag.as_str() == node.tag);
                    if !same_tag {
                        self.disconnect(existing);
                    }
                    Some(existing).filter(|_| same_tag)
                }
                None => None,
            };
            let child = match reusable {
                Some(existing) => existing,
                None => match self.spawn(&node.tag, Some(id), path.clone()) {
                    Ok(child) => child,
                    Err(err) => {
                        logging::warn!("failed to upgrade <{}>: {err}", node.tag);
                        continue;
                    }
                },
            };
            self.bind_child(child, node);
            next.insert(path, child);
        }

        for stale in previous.into_values() {
            self.disconnect(stale);
        }
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.children = next;
        }
    }

    /// Pushes template attributes and property bindings that changed since the last render.
    fn bind_child(&mut self, child: InstanceId, node: &ElementNode) {
        let (previous_attributes, previous_properties) = match self.instances.get_mut(&child) {
            Some(instance) => (
                std::mem::take(&mut instance.template_attributes),
                std::mem::take(&mut instance.template_properties),
            ),
            None => return,
        };

        let mut attributes = BTreeMap::new();
        for (name, value) in &node.attributes {
            if previous_attributes.get(name) != Some(value) {
                if let Err(err) = self.apply_attribute(child, name, Some(value.as_str())) {
                    logging::warn!("<{}> rejected attribute `{name}`: {err}", node.tag);
                }
            }
            attributes.insert(name.clone(), value.clone());
        }
        for name in previous_attributes.keys() {
            if !attributes.contains_key(name) {
                if let Err(err) = self.apply_attribute(child, name, None) {
                    logging::warn!("<{}> rejected removal of `{name}`: {err}", node.tag);
                }
            }
        }

        let mut properties = BTreeMap::new();
        for (name, value) in &node.properties {
            if previous_properties.get(name) != Some(value) {
                let result = self.instance_mut(child).and_then(|instance| {
                    instance
                        .props
                        .set(name, value.clone())
                        .map_err(RuntimeError::from)
                });
                if let Err(err) = result {
                    logging::warn!("<{}> rejected property `{name}`: {err}", node.tag);
                }
            }
            properties.insert(name.clone(), value.clone());
        }
        self.sync_pending(child);

        if let Some(instance) = self.instances.get_mut(&child) {
            instance.template_attributes = attributes;
            instance.template_properties = properties;
            instance.light = node.children.clone();
        }
    }

    fn dispatch_all(&mut self, source: InstanceId, events: Vec<CustomEvent>) {
        let mut queue: VecDeque<(InstanceId, CustomEvent)> =
            events.into_iter().map(|event| (source, event)).collect();
        while let Some((target, event)) = queue.pop_front() {
            let follow_ups = self.dispatch(target, event);
            queue.extend(follow_ups);
        }
    }

    fn dispatch(
        &mut self,
        target: InstanceId,
        mut event: CustomEvent,
    ) -> Vec<(InstanceId, CustomEvent)> {
        let mut follow_ups = Vec::new();
        self.deliver_at(target, &mut event, &mut follow_ups);
        if !event.bubbles {
            return follow_ups;
        }

        let mut current = target;
        loop {
            let Some(parent) = self.instances.get(&current).map(|i| i.parent) else {
                break;
            };
            match parent {
                // Leaving the parent's shadow root.
                Some(_) if !event.composed => break,
                Some(parent) => {
                    current = parent;
                    self.deliver_at(current, &mut event, &mut follow_ups);
                }
                None => {
                    self.call_listeners(ListenerTarget::Document, &mut event);
                    self.document_log.push(DispatchedEvent { target, event });
                    break;
                }
            }
        }
        follow_ups
    }

    fn deliver_at(
        &mut self,
        host: InstanceId,
        event: &mut CustomEvent,
        follow_ups: &mut Vec<(InstanceId, CustomEvent)>,
    ) {
        let template_listener = self.instances.get(&host).and_then(|instance| {
            let parent = instance.parent?;
            let node = self
                .instances
                .get(&parent)?
                .tree
                .as_ref()?
                .at_path(&instance.host_path)?
                .as_element()?;
            node.listener(event.name.as_str())
                .cloned()
                .map(|action| (parent, action))
        });

        if let Some((parent, action)) = template_listener {
            let snapshot = event.clone();
            let emitted = self.run_callback(parent, |element, ctx| {
                element.on_child_event(ctx, &action, &snapshot)
            });
            follow_ups.extend(emitted.into_iter().map(|e| (parent, e)));
        }
        self.call_listeners(ListenerTarget::Instance(host), event);
    }

    fn call_listeners(&mut self, target: ListenerTarget, event: &mut CustomEvent) {
        let name = event.name.as_str().to_string();
        for listener in self
            .listeners
            .iter_mut()
            .filter(|listener| listener.target == target && listener.event == name)
        {
            (listener.callback)(event);
        }
    }

    fn push_listener(
        &mut self,
        target: ListenerTarget,
        event: &str,
        callback: Box<dyn FnMut(&mut CustomEvent)>,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target,
            event: event.to_string(),
            callback,
        });
        id
    }

    fn compose_host(&self, id: InstanceId, projection: &Projection<'_>) -> RenderNode {
        let Some(instance) = self.instances.get(&id) else {
            return RenderNode::Text(String::new());
        };
        let mut host = ElementNode {
            tag: instance.tag.as_str().to_string(),
            attributes: instance
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            ..ElementNode::default()
        };
        host.set_attribute(INSTANCE_ATTRIBUTE, &id.to_string());
        if let Some(tree) = &instance.tree {
            host.children = self.compose_in_scope(Some(id), tree, &mut Vec::new(), Some(projection));
        }
        host.into()
    }

    fn compose_in_scope(
        &self,
        scope: Option<InstanceId>,
        node: &RenderNode,
        path: &mut NodePath,
        projection: Option<&Projection<'_>>,
    ) -> Vec<RenderNode> {
        match node {
            RenderNode::Text(_) => vec![node.clone()],
            RenderNode::Slot(slot) => {
                if let Some(projection) = projection {
                    let slot_owner = scope
                        .and_then(|scope| self.instances.get(&scope))
                        .map(|owner| owner.tag.as_str());
                    let assigned: Vec<RenderNode> = projection
                        .light
                        .iter()
                        .enumerate()
                        .filter(|(_, light)| slot.accepts(light))
                        .flat_map(|(index, light)| {
                            let mut light_path = projection.base.clone();
                            light_path.push(index);
                            self.compose_in_scope(
                                projection.owner,
                                light,
                                &mut light_path,
                                projection.outer,
                            )
                        })
                        .map(|mut assigned| {
                            if let (RenderNode::Element(node), Some(tag)) =
                                (&mut assigned, slot_owner)
                            {
                                node.mark_slotted(tag);
                            }
                            assigned
                        })
                        .collect();
                    if !assigned.is_empty() {
                        return assigned;
                    }
                }
                self.compose_children(scope, &slot.fallback, path, projection)
            }
            RenderNode::Element(element) => {
                let child = scope
                    .and_then(|scope| self.instances.get(&scope))
                    .and_then(|owner| owner.children.get(path.as_slice()));
                if let Some(child) = child {
                    let child_projection = Projection {
                        owner: scope,
                        light: &element.children,
                        base: path.clone(),
                        outer: projection,
                    };
                    return vec![self.compose_host(*child, &child_projection)];
                }
                let mut composed = ElementNode {
                    children: Vec::new(),
                    ..element.clone()
                };
                composed.children =
                    self.compose_children(scope, &element.children, path, projection);
                vec![composed.into()]
            }
        }
    }

    fn compose_children(
        &self,
        scope: Option<InstanceId>,
        children: &[RenderNode],
        path: &mut NodePath,
        projection: Option<&Projection<'_>>,
    ) -> Vec<RenderNode> {
        let mut out = Vec::new();
        for (index, child) in children.iter().enumerate() {
            path.push(index);
            out.extend(self.compose_in_scope(scope, child, path, projection));
            path.pop();
        }
        out
    }
}

fn reflect_properties(
    props: &PropertyStore,
    attributes: &mut BTreeMap<String, String>,
    changes: &[PropertyChange],
    first: bool,
) {
    for descriptor in props.descriptors().iter().filter(|d| d.reflects()) {
        if !first && !changes.iter().any(|change| change.name == descriptor.name()) {
            continue;
        }
        let Some(attribute) = descriptor.attribute_name() else {
            continue;
        };
        match descriptor.kind().to_attribute(&props.get(descriptor.name())) {
            Some(value) => {
                attributes.insert(attribute, value);
            }
            None => {
                attributes.remove(&attribute);
            }
        }
    }
}

fn collect_components<'a>(
    registry: &ElementRegistry,
    node: &'a RenderNode,
    path: &mut NodePath,
    found: &mut Vec<(NodePath, &'a ElementNode)>,
) {
    if let RenderNode::Element(element) = node {
        if registry.is_defined(&element.tag) {
            found.push((path.clone(), element));
        }
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        collect_components(registry, child, path, found);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use element_contract::{PropKind, PropertyDescriptor};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::registry::ElementDefinition;
    use crate::tree::{el, named_slot, slot, text, Action, SCOPE_ATTRIBUTE, SLOTTED_ATTRIBUTE};

    #[derive(Default)]
    struct Counter {
        delay: Option<TimerHandle>,
    }

    impl Element for Counter {
        fn render(&self, props: &PropertyStore) -> RenderNode {
            el("div")
                .part("root")
                .child(
                    el("button")
                        .part("inc")
                        .bool_attr("disabled", props.flag("disabled"))
                        .on(DomEvent::Click, "inc")
                        .child(props.text("label")),
                )
                .child(el("span").part("count").child(props.text("count")))
                .child(el("span").part("doubled").child(props.text("doubled")))
                .child(el("button").part("delay").on(DomEvent::Click, "delay"))
                .child(el("button").part("inner").on(DomEvent::Click, "inner"))
                .child(el("button").part("local").on(DomEvent::Click, "local"))
                .child(el("button").part("stale").on(DomEvent::Click, "stale"))
                .into()
        }

        fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
            match action.name() {
                "inc" => {
                    let next = ctx.props().number("count").unwrap_or(0.0) + 1.0;
                    ctx.set("count", next).expect("count");
                    ctx.emit(CustomEvent::new("sh-counter-change", json!({ "count": next })));
                }
                "delay" => self.delay = Some(ctx.set_timeout(300, "fire")),
                "inner" => ctx.emit(CustomEvent::new("sh-counter-inner", json!({})).uncomposed()),
                "local" => ctx.emit(CustomEvent::new("sh-counter-local", json!({ "local": true })).local()),
                "stale" => {
                    if ctx.update("retired", 1.0) {
                        ctx.emit(CustomEvent::new("sh-counter-stale", json!({})));
                    }
                }
                _ => {}
            }
        }

        fn on_timer(&mut self, ctx: &mut ElementContext<'_>, action: &Action) {
            if action.is("fire") {
                self.delay = None;
                ctx.emit(CustomEvent::new("sh-counter-fire", json!({})));
            }
        }

        fn updated(&mut self, ctx: &mut ElementContext<'_>, changes: &[PropertyChange]) {
            if changes.iter().any(|change| change.name == "count") {
                let doubled = ctx.props().number("count").unwrap_or(0.0) * 2.0;
                ctx.set("doubled", doubled).expect("doubled");
            }
        }
    }

    struct Panel;

    impl Element for Panel {
        fn render(&self, props: &PropertyStore) -> RenderNode {
            el("section")
                .part("panel")
                .child(
                    el("sh-counter")
                        .attr("label", props.text("title"))
                        .prop("count", props.get("seed"))
                        .listen("sh-counter-change", "child-changed")
                        .listen("sh-counter-inner", "child-inner"),
                )
                .child(named_slot("header").fallback(text("No header")))
                .child(slot())
                .into()
        }

        fn on_child_event(
            &mut self,
            ctx: &mut ElementContext<'_>,
            action: &Action,
            event: &CustomEvent,
        ) {
            if action.is("child-changed") {
                let count = event.detail["count"].as_f64().unwrap_or(0.0);
                ctx.set("last", count).expect("last");
            } else if action.is("child-inner") {
                ctx.set("inner_seen", true).expect("inner_seen");
            }
        }
    }

    fn counter() -> Box<dyn Element> {
        Box::new(Counter::default())
    }

    fn panel() -> Box<dyn Element> {
        Box::new(Panel)
    }

    fn registry() -> ElementRegistry {
        let mut registry = ElementRegistry::new();
        registry
            .define(
                ElementDefinition::new(TagName::trusted("sh-counter"), counter).properties(vec![
                    PropertyDescriptor::text("label", "Add"),
                    PropertyDescriptor::number("count", 0.0),
                    PropertyDescriptor::state("doubled", PropKind::Number, PropValue::Number(0.0)),
                    PropertyDescriptor::boolean("disabled", false),
                    PropertyDescriptor::boolean("active", false).reflect(),
                ]),
            )
            .expect("define counter");
        registry
            .define(
                ElementDefinition::new(TagName::trusted("sh-panel"), panel).properties(vec![
                    PropertyDescriptor::text("title", "Counter"),
                    PropertyDescriptor::number("seed", 5.0),
                    PropertyDescriptor::number("last", 0.0),
                    PropertyDescriptor::state("inner_seen", PropKind::Boolean, PropValue::Bool(false)),
                ]),
            )
            .expect("define panel");
        registry
    }

    fn mounted(tag: &str) -> (ElementRuntime, InstanceId) {
        let mut runtime = ElementRuntime::new(registry());
        let id = runtime.create_element(tag).expect("create");
        runtime.flush();
        (runtime, id)
    }

    fn part_text(runtime: &ElementRuntime, id: InstanceId, part: &str) -> String {
        runtime.part(id, part).expect("part").text_content()
    }

    #[test]
    fn creation_queues_exactly_one_first_render() {
        let mut runtime = ElementRuntime::new(registry());
        let id = runtime.create_element("sh-counter").expect("create");

        assert_eq!(runtime.is_render_pending(id), Ok(true));
        assert_eq!(runtime.tree(id), Ok(None));
        assert_eq!(runtime.flush(), 1);
        assert_eq!(runtime.render_count(id), Ok(1));
        assert_eq!(runtime.flush(), 0);
        assert_eq!(
            runtime.part(id, "inc").expect("inc").attribute(SCOPE_ATTRIBUTE),
            Some("sh-counter")
        );
        assert_eq!(
            runtime.create_element("sh-missing"),
            Err(RuntimeError::UnknownElement("sh-missing".to_string()))
        );
    }

    #[test]
    fn equal_writes_never_render_or_mutate() {
        let (mut runtime, id) = mounted("sh-counter");
        let mutations = runtime.mutation_count(id).expect("mutations");

        assert_eq!(runtime.set_property(id, "count", 0.0), Ok(false));
        runtime.set_attribute(id, "label", "Add").expect("label");

        assert_eq!(runtime.flush(), 0);
        assert_eq!(runtime.render_count(id), Ok(1));
        assert_eq!(runtime.mutation_count(id), Ok(mutations));
        assert!(runtime.drain_events().is_empty());
    }

    #[test]
    fn synchronous_writes_coalesce_into_one_render_of_final_values() {
        let (mut runtime, id) = mounted("sh-counter");

        for label in ["First", "Second", "Third"] {
            runtime.set_property(id, "label", label).expect("label");
        }
        assert_eq!(runtime.render_count(id), Ok(1));
        assert_eq!(runtime.flush(), 1);
        assert_eq!(runtime.render_count(id), Ok(2));
        assert_eq!(part_text(&runtime, id, "inc"), "Third");
    }

    #[test]
    fn writes_made_after_a_render_land_in_the_next_pass() {
        let (mut runtime, id) = mounted("sh-counter");

        runtime.set_property(id, "count", 4.0).expect("count");
        assert_eq!(runtime.flush(), 2);
        assert_eq!(part_text(&runtime, id, "count"), "4");
        assert_eq!(part_text(&runtime, id, "doubled"), "8");
        assert_eq!(runtime.is_render_pending(id), Ok(false));
    }

    #[test]
    fn rejected_callback_writes_skip_their_event() {
        let (mut runtime, id) = mounted("sh-counter");

        assert_eq!(runtime.click(id, "stale"), Ok(true));
        assert!(runtime.drain_events().is_empty());
        assert_eq!(runtime.is_render_pending(id), Ok(false));
        assert_eq!(runtime.render_count(id), Ok(1));
    }

    #[test]
    fn attributes_sync_both_ways_with_presence_semantics() {
        let (mut runtime, id) = mounted("sh-counter");

        runtime.set_attribute(id, "disabled", "false").expect("disabled");
        assert_eq!(runtime.property(id, "disabled"), Ok(PropValue::Bool(true)));
        runtime.remove_attribute(id, "disabled").expect("remove");
        assert_eq!(runtime.property(id, "disabled"), Ok(PropValue::Bool(false)));

        runtime.set_property(id, "active", true).expect("active");
        runtime.flush();
        assert_eq!(runtime.attribute(id, "active"), Ok(Some("")));
        runtime.set_property(id, "active", false).expect("active");
        runtime.flush();
        assert_eq!(runtime.attribute(id, "active"), Ok(None));

        runtime.set_attribute(id, "data-test", "x").expect("plain attribute");
        assert_eq!(runtime.attribute(id, "data-test"), Ok(Some("x")));
        assert_eq!(runtime.property(id, "data_test"), Ok(PropValue::Null));
    }

    #[test]
    fn disabled_nodes_block_pointer_and_keyboard_activation() {
        let (mut runtime, id) = mounted("sh-counter");
        runtime.set_property(id, "disabled", true).expect("disabled");
        runtime.flush();

        assert_eq!(runtime.click(id, "inc"), Ok(false));
        assert_eq!(runtime.key_down(id, "inc", Key::Enter), Ok(false));
        assert_eq!(runtime.property(id, "count"), Ok(PropValue::Number(0.0)));
        assert!(runtime.drain_events().is_empty());
    }

    #[test]
    fn enter_and_space_on_buttons_run_the_click_handler() {
        let (mut runtime, id) = mounted("sh-counter");

        assert_eq!(runtime.key_down(id, "inc", Key::Enter), Ok(true));
        assert_eq!(runtime.key_down(id, "inc", Key::Space), Ok(true));
        assert_eq!(runtime.key_down(id, "inc", Key::from_dom("a")), Ok(false));
        assert_eq!(runtime.click(id, "inc"), Ok(true));

        let details: Vec<_> = runtime
            .drain_events()
            .into_iter()
            .map(|dispatched| dispatched.event.detail)
            .collect();
        assert_eq!(
            details,
            vec![json!({"count": 1.0}), json!({"count": 2.0}), json!({"count": 3.0})]
        );
        assert_eq!(
            runtime.click(id, "missing"),
            Err(RuntimeError::UnknownPart {
                instance: id,
                part: "missing".to_string(),
            })
        );
    }

    #[test]
    fn nested_components_upgrade_and_receive_changed_bindings_only() {
        let (mut runtime, panel) = mounted("sh-panel");
        let child = runtime
            .find_descendant(panel, "sh-counter")
            .expect("upgraded child");

        assert_eq!(runtime.parent(child), Ok(Some(panel)));
        assert_eq!(runtime.property(child, "count"), Ok(PropValue::Number(5.0)));
        assert_eq!(runtime.property(child, "label"), Ok(PropValue::from("Counter")));

        runtime.click(child, "inc").expect("click");
        assert_eq!(runtime.property(child, "count"), Ok(PropValue::Number(6.0)));
        assert_eq!(runtime.property(panel, "last"), Ok(PropValue::Number(6.0)));

        let events = runtime.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, child);
        assert_eq!(events[0].event.name, "sh-counter-change");

        runtime.set_property(panel, "title", "Renamed").expect("title");
        runtime.flush();
        assert_eq!(runtime.property(child, "count"), Ok(PropValue::Number(6.0)));
        assert_eq!(part_text(&runtime, child, "inc"), "Renamed");
        assert_eq!(runtime.children(panel), Ok(vec![child]));
    }

    #[test]
    fn uncomposed_events_stop_at_the_owning_shadow_root() {
        let (mut runtime, panel) = mounted("sh-panel");
        let child = runtime.find_descendant(panel, "sh-counter").expect("child");

        runtime.click(child, "inner").expect("click");
        assert_eq!(runtime.property(panel, "inner_seen"), Ok(PropValue::Bool(true)));
        assert!(runtime.drain_events().is_empty());
    }

    #[test]
    fn local_events_reach_only_target_listeners() {
        let (mut runtime, id) = mounted("sh-counter");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        runtime
            .add_event_listener(id, "sh-counter-local", move |event| {
                sink.borrow_mut().push(event.detail.clone())
            })
            .expect("listen");
        let document_hits = Rc::new(RefCell::new(0));
        let hits = Rc::clone(&document_hits);
        let listener = runtime.add_document_listener("sh-counter-change", move |_| {
            *hits.borrow_mut() += 1;
        });

        runtime.click(id, "local").expect("click");
        runtime.click(id, "inc").expect("click");

        assert_eq!(*seen.borrow(), vec![json!({"local": true})]);
        assert_eq!(*document_hits.borrow(), 1);
        assert_eq!(runtime.drain_events().len(), 1);
        assert!(runtime.remove_listener(listener));
        assert!(!runtime.remove_listener(listener));
    }

    #[test]
    fn timers_fire_once_when_due() {
        let (mut runtime, id) = mounted("sh-counter");
        runtime.click(id, "delay").expect("click");
        assert_eq!(runtime.pending_timers(id), 1);

        runtime.advance(299);
        assert!(runtime.drain_events().is_empty());
        runtime.advance(1);
        let fired: Vec<_> = runtime
            .drain_events()
            .into_iter()
            .map(|dispatched| dispatched.event.name.to_string())
            .collect();
        assert_eq!(fired, vec!["sh-counter-fire".to_string()]);
        runtime.advance(1_000);
        assert!(runtime.drain_events().is_empty());
        assert_eq!(runtime.now(), 1_300);
    }

    #[test]
    fn removing_an_instance_cancels_every_timer_in_its_subtree() {
        let (mut runtime, panel) = mounted("sh-panel");
        let child = runtime.find_descendant(panel, "sh-counter").expect("child");
        runtime.click(child, "delay").expect("click");
        assert_eq!(runtime.timer_count(), 1);

        runtime.remove_element(panel).expect("remove");
        assert!(!runtime.is_connected(panel));
        assert!(!runtime.is_connected(child));
        assert_eq!(runtime.pending_timers(child), 0);
        assert_eq!(runtime.timer_count(), 0);

        runtime.advance(1_000);
        assert!(runtime.drain_events().is_empty());
        assert_eq!(
            runtime.remove_element(panel),
            Err(RuntimeError::UnknownInstance(panel))
        );
    }

    #[test]
    fn composed_tree_inlines_children_and_projects_slots() {
        let (mut runtime, panel) = mounted("sh-panel");
        let fallback = runtime.composed_tree(panel).expect("composed");
        assert!(fallback.text_content().contains("No header"));

        runtime
            .set_light_content(
                panel,
                vec![
                    el("h2").attr("slot", "header").child("Title").into(),
                    RenderNode::from("body"),
                ],
            )
            .expect("light content");
        let composed = runtime.composed_tree(panel).expect("composed");
        let host = composed.as_element().expect("host");
        let panel_id = panel.to_string();

        assert_eq!(host.tag, "sh-panel");
        assert_eq!(host.attribute(INSTANCE_ATTRIBUTE), Some(panel_id.as_str()));
        assert!(composed
            .find_tag("sh-counter")
            .and_then(|node| node.attribute(INSTANCE_ATTRIBUTE))
            .is_some());
        assert!(composed.find_part("inc").is_some());
        assert_eq!(
            composed.find_tag("h2").map(ElementNode::text_content),
            Some("Title".to_string())
        );
        assert_eq!(
            composed.find_tag("h2").and_then(|node| node.attribute(SLOTTED_ATTRIBUTE)),
            Some("sh-panel")
        );
        assert!(!composed.text_content().contains("No header"));
        assert!(composed.text_content().ends_with("body"));
    }

    #[test]
    fn render_pass_cap_defers_the_remaining_queue() {
        let config = RuntimeConfig {
            max_render_passes: 1,
            ..RuntimeConfig::default()
        };
        let mut runtime = ElementRuntime::with_config(registry(), config);
        let first = runtime.create_element("sh-counter").expect("first");
        let second = runtime.create_element("sh-counter").expect("second");

        assert_eq!(runtime.flush(), 1);
        assert_eq!(runtime.render_count(first), Ok(1));
        assert_eq!(runtime.is_render_pending(second), Ok(true));
        assert_eq!(runtime.flush(), 1);
        assert_eq!(runtime.render_count(second), Ok(1));
    }
}
