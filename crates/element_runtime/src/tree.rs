//! Structured render output produced by [`Element::render`](crate::Element::render).

use element_contract::{DomEvent, PropValue};

/// Attribute carrying a node's scope (the tag of the component that rendered it).
pub const SCOPE_ATTRIBUTE: &str = "data-scope";
/// Attribute naming an addressable node for interactions.
pub const PART_ATTRIBUTE: &str = "data-part";
/// Attribute annotating composed host nodes with their instance id.
pub const INSTANCE_ATTRIBUTE: &str = "data-instance";
/// Space-separated tags of the components whose slots a composed light node was assigned to.
pub const SLOTTED_ATTRIBUTE: &str = "data-slotted";

/// Handler reference attached to a render node.
///
/// `name` selects the behavior inside the owning element; `arg` carries an optional
/// per-node parameter such as a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    name: &'static str,
    arg: Option<String>,
}

impl Action {
    /// Action without an argument.
    pub const fn new(name: &'static str) -> Self {
        Self { name, arg: None }
    }

    /// Action with an argument.
    pub fn with_arg(name: &'static str, arg: impl Into<String>) -> Self {
        Self {
            name,
            arg: Some(arg.into()),
        }
    }

    /// Action name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Optional argument.
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// Whether the action has this name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl From<&'static str> for Action {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// One node of a render tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// Element node.
    Element(ElementNode),
    /// Text node.
    Text(String),
    /// Slot insertion point.
    Slot(SlotNode),
}

impl RenderNode {
    /// Element payload, if this is an element.
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(node) => Some(node),
            _ => None,
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(node) => node.children.iter().for_each(|c| c.collect_text(out)),
            Self::Slot(slot) => slot.fallback.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&ElementNode) -> bool) -> Option<&ElementNode> {
        match self {
            Self::Element(node) => {
                if predicate(node) {
                    return Some(node);
                }
                node.children.iter().find_map(|c| c.find(predicate))
            }
            Self::Slot(slot) => slot.fallback.iter().find_map(|c| c.find(predicate)),
            Self::Text(_) => None,
        }
    }

    /// First element whose `data-part` equals `part`.
    pub fn find_part(&self, part: &str) -> Option<&ElementNode> {
        self.find(&|node| node.attribute(PART_ATTRIBUTE) == Some(part))
    }

    /// First element with this tag.
    pub fn find_tag(&self, tag: &str) -> Option<&ElementNode> {
        self.find(&|node| node.tag == tag)
    }

    /// Every element matching `predicate`, in document order.
    pub fn find_all(&self, predicate: &dyn Fn(&ElementNode) -> bool) -> Vec<&ElementNode> {
        let mut out = Vec::new();
        self.collect_matches(predicate, &mut out);
        out
    }

    fn collect_matches<'a>(
        &'a self,
        predicate: &dyn Fn(&ElementNode) -> bool,
        out: &mut Vec<&'a ElementNode>,
    ) {
        match self {
            Self::Element(node) => {
                if predicate(node) {
                    out.push(node);
                }
                node.children
                    .iter()
                    .for_each(|c| c.collect_matches(predicate, out));
            }
            Self::Slot(slot) => slot
                .fallback
                .iter()
                .for_each(|c| c.collect_matches(predicate, out)),
            Self::Text(_) => {}
        }
    }

    pub(crate) fn stamp_scope(&mut self, scope: &str) {
        match self {
            Self::Element(node) => {
                node.set_attribute(SCOPE_ATTRIBUTE, scope);
                node.children.iter_mut().for_each(|c| c.stamp_scope(scope));
            }
            Self::Slot(slot) => slot.fallback.iter_mut().for_each(|c| c.stamp_scope(scope)),
            Self::Text(_) => {}
        }
    }

    /// Node at a child-index path below this node.
    pub fn at_path(&self, path: &[usize]) -> Option<&RenderNode> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children().get(*first)?.at_path(rest)
    }

    pub(crate) fn children(&self) -> &[RenderNode] {
        match self {
            Self::Element(node) => &node.children,
            Self::Slot(slot) => &slot.fallback,
            Self::Text(_) => &[],
        }
    }
}

impl From<ElementNode> for RenderNode {
    fn from(node: ElementNode) -> Self {
        Self::Element(node)
    }
}

impl From<SlotNode> for RenderNode {
    fn from(node: SlotNode) -> Self {
        Self::Slot(node)
    }
}

impl From<&str> for RenderNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RenderNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Element node with attributes, bindings, and handlers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    /// Tag name.
    pub tag: String,
    /// Ordered attributes.
    pub attributes: Vec<(String, String)>,
    /// Property bindings pushed to a child component.
    pub properties: Vec<(String, PropValue)>,
    /// DOM event handlers.
    pub handlers: Vec<(DomEvent, Action)>,
    /// Custom-event listeners on this node.
    pub listeners: Vec<(String, Action)>,
    /// Child nodes.
    pub children: Vec<RenderNode>,
}

/// Starts an element node.
pub fn el(tag: &str) -> ElementNode {
    ElementNode {
        tag: tag.to_string(),
        ..ElementNode::default()
    }
}

/// Text node.
pub fn text(value: impl Into<String>) -> RenderNode {
    RenderNode::Text(value.into())
}

/// Default slot.
pub fn slot() -> SlotNode {
    SlotNode::default()
}

/// Named slot.
pub fn named_slot(name: &str) -> SlotNode {
    SlotNode {
        name: Some(name.to_string()),
        fallback: Vec::new(),
    }
}

impl ElementNode {
    /// Attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Handler for a DOM event family.
    pub fn handler(&self, event: DomEvent) -> Option<&Action> {
        self.handlers
            .iter()
            .find(|(kind, _)| *kind == event)
            .map(|(_, action)| action)
    }

    /// Listener for a custom event name.
    pub fn listener(&self, event: &str) -> Option<&Action> {
        self.listeners
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, action)| action)
    }

    /// Concatenated text of this node's subtree.
    pub fn text_content(&self) -> String {
        self.children.iter().map(RenderNode::text_content).collect()
    }

    pub(crate) fn mark_slotted(&mut self, tag: &str) {
        let mut tags: Vec<&str> = self
            .attribute(SLOTTED_ATTRIBUTE)
            .map(|existing| existing.split_whitespace().collect())
            .unwrap_or_default();
        if tags.contains(&tag) {
            return;
        }
        tags.push(tag);
        let value = tags.join(" ");
        self.set_attribute(SLOTTED_ATTRIBUTE, &value);
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Sets `class`, ignoring empty class segments.
    pub fn class(self, classes: impl AsRef<str>) -> Self {
        let joined = classes
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        self.attr("class", joined)
    }

    /// Adds or replaces an attribute.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, &value.into());
        self
    }

    /// Adds an attribute when `value` is `Some`.
    pub fn attr_if(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute: present as `""` when `on`, absent otherwise.
    pub fn bool_attr(self, name: &str, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Marks the node as an addressable part.
    pub fn part(self, part: &str) -> Self {
        self.attr(PART_ATTRIBUTE, part)
    }

    /// Binds a property on a child component.
    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.properties.push((name.to_string(), value.into()));
        self
    }

    /// Attaches a DOM event handler.
    pub fn on(mut self, event: DomEvent, action: impl Into<Action>) -> Self {
        self.handlers.push((event, action.into()));
        self
    }

    /// Listens for a custom event dispatched on this node.
    pub fn listen(mut self, event: &str, action: impl Into<Action>) -> Self {
        self.listeners.push((event.to_string(), action.into()));
        self
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RenderNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends a child when present. Absent optional regions emit nothing.
    pub fn maybe_child(self, child: Option<impl Into<RenderNode>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }
}

/// Slot insertion point with fallback content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotNode {
    /// Slot name; `None` is the default slot.
    pub name: Option<String>,
    /// Content shown when nothing is assigned.
    pub fallback: Vec<RenderNode>,
}

impl SlotNode {
    /// Appends fallback content.
    pub fn fallback(mut self, child: impl Into<RenderNode>) -> Self {
        self.fallback.push(child.into());
        self
    }

    /// Whether a light-DOM node is assigned to this slot.
    pub fn accepts(&self, node: &RenderNode) -> bool {
        let assigned = match node {
            RenderNode::Element(element) => element.attribute("slot"),
            _ => None,
        };
        assigned == self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builders_collapse_class_whitespace_and_skip_absent_regions() {
        let node = el("span")
            .class(format!("badge {} {}", "success", ""))
            .bool_attr("disabled", false)
            .attr_if("title", None::<String>)
            .maybe_child(None::<RenderNode>)
            .child("Ok");

        assert_eq!(node.attribute("class"), Some("badge success"));
        assert!(node.has_class("success"));
        assert_eq!(node.attribute("disabled"), None);
        assert_eq!(node.attribute("title"), None);
        assert_eq!(node.children, vec![RenderNode::from("Ok")]);
    }

    #[test]
    fn part_lookup_and_paths_walk_the_tree() {
        let tree = RenderNode::from(
            el("div")
                .child(el("span").part("label").child("Total"))
                .child(el("button").part("confirm").child("Go")),
        );

        assert_eq!(
            tree.find_part("confirm").map(ElementNode::text_content),
            Some("Go".to_string())
        );
        assert_eq!(tree.at_path(&[0, 0]), Some(&RenderNode::from("Total")));
        assert_eq!(tree.at_path(&[3]), None);
        assert_eq!(tree.text_content(), "TotalGo");
    }

    #[test]
    fn slots_accept_nodes_by_slot_attribute() {
        let header = RenderNode::from(el("h3").attr("slot", "header"));
        let body = RenderNode::from(el("p"));
        assert!(named_slot("header").accepts(&header));
        assert!(!named_slot("header").accepts(&body));
        assert!(slot().accepts(&body));
        assert!(slot().accepts(&RenderNode::from("loose text")));
    }
}
