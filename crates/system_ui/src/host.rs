//! Leptos adapter that mounts runtime-hosted elements into a real document.
//!
//! [`ElementRuntimeProvider`] owns one [`ElementRuntime`] per page, injects the scoped
//! catalogue stylesheet, and drives the virtual clock from a browser interval while timers
//! are pending. [`ElementHost`] mounts one top-level instance: it serialises the composed
//! tree into its container and delegates DOM events on `data-part` nodes back into the
//! runtime. Every part node carries `data-owner`, the instance whose handler it targets.

use std::time::Duration;

use element_contract::{Interaction, Key, PropValue};
use element_runtime::{
    DispatchedEvent, ElementRegistry, ElementRuntime, InstanceId, RenderNode, RuntimeConfig,
    RuntimeError, ThemeTokens, INSTANCE_ATTRIBUTE, PART_ATTRIBUTE, SCOPE_ATTRIBUTE,
};
use leptos::*;
use wasm_bindgen::JsCast;

/// Attribute naming the instance that owns a part node.
pub const OWNER_ATTRIBUTE: &str = "data-owner";

const VOID_ELEMENTS: [&str; 8] = ["area", "br", "col", "hr", "img", "input", "link", "meta"];

#[derive(Clone, Copy)]
/// Leptos context for reaching the page's element runtime.
pub struct ElementRuntimeContext {
    /// Runtime hosting every mounted element.
    pub runtime: StoredValue<ElementRuntime>,
    /// Bumped after every task so hosts re-read their composed trees.
    pub revision: RwSignal<u64>,
    on_event: Option<Callback<DispatchedEvent>>,
}

impl ElementRuntimeContext {
    /// Runs `task` as one runtime task: flushes renders, forwards events that reached the
    /// document, and bumps the revision.
    ///
    /// Returns `None` once the provider has been disposed.
    pub fn run<R>(&self, task: impl FnOnce(&mut ElementRuntime) -> R) -> Option<R> {
        let (result, events) = self.runtime.try_update_value(|runtime| {
            let result = task(runtime);
            runtime.flush();
            (result, runtime.drain_events())
        })?;
        self.revision.update(|revision| *revision += 1);
        if let Some(on_event) = self.on_event {
            for event in events {
                on_event.call(event);
            }
        }
        Some(result)
    }
}

#[component]
/// Provides [`ElementRuntimeContext`] to descendant [`ElementHost`] components.
pub fn ElementRuntimeProvider(
    /// Element definitions available on the page.
    registry: ElementRegistry,
    /// Runtime tuning; defaults apply when omitted.
    #[prop(optional)]
    config: Option<RuntimeConfig>,
    /// Page-level token overrides.
    #[prop(optional)]
    tokens: Option<ThemeTokens>,
    /// Receives every custom event that reaches the document.
    #[prop(optional, into)]
    on_event: Option<Callback<DispatchedEvent>>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let frame_ms = config.frame_interval_ms;
    let mut runtime = ElementRuntime::with_config(registry, config);
    if let Some(tokens) = tokens {
        runtime.set_theme_tokens(tokens);
    }
    let css = format!("{}{}", crate::GLOBAL_CSS, runtime.stylesheet());

    let context = ElementRuntimeContext {
        runtime: store_value(runtime),
        revision: create_rw_signal(0),
        on_event,
    };
    provide_context(context);

    if let Ok(interval) = set_interval_with_handle(
        move || {
            let pending = context
                .runtime
                .try_with_value(|runtime| runtime.next_timer_due().is_some())
                .unwrap_or(false);
            if pending {
                context.run(|runtime| runtime.advance(frame_ms));
            }
        },
        Duration::from_millis(frame_ms),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <style data-element-runtime="">{css}</style>
        {children()}
    }
}

/// Returns the current [`ElementRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ElementRuntimeProvider`].
pub fn use_element_runtime() -> ElementRuntimeContext {
    use_context::<ElementRuntimeContext>().expect("ElementRuntimeContext not provided")
}

#[component]
/// Mounts one top-level instance of `tag` for the lifetime of this view.
pub fn ElementHost(
    /// Custom-element tag to instantiate.
    tag: &'static str,
    /// Initial host attributes.
    #[prop(optional)]
    attributes: Vec<(&'static str, String)>,
    /// Initial property values, applied after attributes.
    #[prop(optional)]
    properties: Vec<(&'static str, PropValue)>,
) -> impl IntoView {
    let context = use_element_runtime();
    let mounted = context.run(|runtime| {
        let id = runtime.create_element(tag)?;
        for (name, value) in &attributes {
            runtime.set_attribute(id, name, value)?;
        }
        for (name, value) in properties {
            runtime.set_property(id, name, value)?;
        }
        Ok::<_, RuntimeError>(id)
    });
    let id = match mounted {
        Some(Ok(id)) => id,
        Some(Err(err)) => {
            logging::warn!("failed to mount <{tag}>: {err}");
            return ().into_view();
        }
        None => return ().into_view(),
    };
    on_cleanup(move || {
        let _ = context.runtime.try_update_value(|runtime| runtime.remove_element(id));
    });

    let html = create_memo(move |_| {
        context.revision.track();
        context
            .runtime
            .try_with_value(|runtime| runtime.composed_tree(id).ok())
            .flatten()
            .map(|tree| markup(&tree))
            .unwrap_or_default()
    });

    let container = create_node_ref::<html::Div>();
    create_effect(move |_| {
        let html = html.get();
        let Some(node) = container.get() else {
            return;
        };
        let focus = FocusSnapshot::capture(&node);
        node.set_inner_html(&html);
        if let Some(focus) = focus {
            focus.restore(&node);
        }
    });

    let deliver = move |target: Option<web_sys::EventTarget>, interaction: Interaction| {
        let Some((owner, part)) = target.and_then(|target| part_target(&target)) else {
            return;
        };
        match context.run(|runtime| runtime.interact(owner, &part, interaction)) {
            Some(Err(err)) => logging::warn!("<{tag}> interaction on `{part}` failed: {err}"),
            Some(Ok(_)) | None => {}
        }
    };

    view! {
        <div
            class="sh-element-host"
            data-element=tag
            data-instance=id.to_string()
            node_ref=container
            on:click=move |ev: ev::MouseEvent| deliver(ev.target(), Interaction::Click)
            on:keydown=move |ev: ev::KeyboardEvent| {
                deliver(ev.target(), Interaction::KeyDown(Key::from_dom(&ev.key())))
            }
            on:input=move |ev: ev::Event| {
                let value = ev
                    .target()
                    .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                deliver(ev.target(), Interaction::Input(value))
            }
            on:focusin=move |ev: ev::FocusEvent| deliver(ev.target(), Interaction::Focus)
            on:focusout=move |ev: ev::FocusEvent| deliver(ev.target(), Interaction::Blur)
        />
    }
    .into_view()
}

/// Resolves an event target to the owning instance and part name.
fn part_target(target: &web_sys::EventTarget) -> Option<(InstanceId, String)> {
    let element = target.dyn_ref::<web_sys::Element>()?;
    let node = element.closest(&format!("[{PART_ATTRIBUTE}]")).ok()??;
    let owner = node.get_attribute(OWNER_ATTRIBUTE)?.parse().ok()?;
    let part = node.get_attribute(PART_ATTRIBUTE)?;
    Some((owner, part))
}

/// Focused part and caret position, kept across a markup swap.
struct FocusSnapshot {
    owner: String,
    part: String,
    caret: Option<u32>,
}

impl FocusSnapshot {
    fn capture(container: &web_sys::Element) -> Option<Self> {
        let active = document().active_element()?;
        if !container.contains(Some(&*active)) {
            return None;
        }
        let caret = active
            .dyn_ref::<web_sys::HtmlInputElement>()
            .and_then(|input| input.selection_start().ok().flatten());
        Some(Self {
            owner: active.get_attribute(OWNER_ATTRIBUTE)?,
            part: active.get_attribute(PART_ATTRIBUTE)?,
            caret,
        })
    }

    fn restore(&self, container: &web_sys::Element) {
        let selector = format!(
            "[{OWNER_ATTRIBUTE}=\"{}\"][{PART_ATTRIBUTE}=\"{}\"]",
            self.owner, self.part
        );
        let Ok(Some(node)) = container.query_selector(&selector) else {
            return;
        };
        if let Some(element) = node.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element.focus();
        }
        if let (Some(input), Some(caret)) = (node.dyn_ref::<web_sys::HtmlInputElement>(), self.caret) {
            let _ = input.set_selection_range(caret, caret);
        }
    }
}

/// Serialises a composed tree to HTML, stamping part nodes with their owner.
///
/// A part belongs to the nearest enclosing host whose tag matches the node's scope, so
/// slotted content resolves to the scope that wrote it rather than the host it renders in.
pub fn markup(tree: &RenderNode) -> String {
    let mut out = String::new();
    write_node(tree, &mut Vec::new(), &mut out);
    out
}

fn write_node<'a>(node: &'a RenderNode, hosts: &mut Vec<(&'a str, &'a str)>, out: &mut String) {
    let element = match node {
        RenderNode::Text(text) => {
            escape_into(text, out);
            return;
        }
        RenderNode::Slot(slot) => {
            for child in &slot.fallback {
                write_node(child, hosts, out);
            }
            return;
        }
        RenderNode::Element(element) => element,
    };

    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attributes {
        write_attribute(name, value, out);
    }
    if element.attribute(PART_ATTRIBUTE).is_some() {
        let owner = element.attribute(SCOPE_ATTRIBUTE).and_then(|scope| {
            hosts
                .iter()
                .rev()
                .find(|(tag, _)| *tag == scope)
                .map(|(_, id)| *id)
        });
        if let Some(owner) = owner {
            write_attribute(OWNER_ATTRIBUTE, owner, out);
        }
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    let instance = element.attribute(INSTANCE_ATTRIBUTE);
    if let Some(id) = instance {
        hosts.push((element.tag.as_str(), id));
    }
    for child in &element.children {
        write_node(child, hosts, out);
    }
    if instance.is_some() {
        hosts.pop();
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, out);
    out.push('"');
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use element_runtime::ElementRegistry;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::molecules::search_input;

    #[test]
    fn text_and_attributes_are_escaped() {
        let tree: RenderNode = element_runtime::el("p")
            .attr("title", "\"quoted\" & <b>")
            .child("1 < 2 & 3")
            .into();
        assert_eq!(
            markup(&tree),
            "<p title=\"&quot;quoted&quot; &amp; &lt;b&gt;\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let tree: RenderNode = element_runtime::el("div")
            .child(element_runtime::el("input").attr("value", "x"))
            .into();
        assert_eq!(markup(&tree), "<div><input value=\"x\"></div>");
    }

    #[test]
    fn part_nodes_are_stamped_with_their_owning_instance() {
        let mut registry = ElementRegistry::new();
        crate::define_all(&mut registry).expect("define catalogue");
        let mut runtime = ElementRuntime::new(registry);
        let id = runtime.create_element(search_input::TAG).expect("create");
        runtime.set_attribute(id, "clearable", "").expect("clearable");
        runtime.set_property(id, "value", "vis").expect("value");
        runtime.flush();

        let html = markup(&runtime.composed_tree(id).expect("composed"));
        let owner = format!("{OWNER_ATTRIBUTE}=\"{id}\"");
        assert!(html.starts_with("<sh-search-input"));
        assert!(html.contains(&format!("{PART_ATTRIBUTE}=\"input\"")));
        assert_eq!(html.matches(&owner).count(), 2);

        let icon = runtime
            .find_descendant(id, crate::icon::TAG)
            .expect("nested icon");
        assert!(html.contains(&format!("{OWNER_ATTRIBUTE}=\"{icon}\"")));
    }
}
