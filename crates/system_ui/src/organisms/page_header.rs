//! `sh-page-header`: page title with breadcrumb trail and action buttons.
//!
//! `breadcrumb` items are `{ label, href? }` objects and `actions` items are
//! `{ label, handler, icon?, variant? }`. A click on an action emits `sh-action-{handler}`.

use element_runtime::prelude::*;
use leptos::logging;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::icon;
use crate::molecules::button;
use crate::palette;
use crate::theme_property;
use crate::tokens::ButtonVariant;

/// Tag of the page header element.
pub const TAG: &str = "sh-page-header";

#[derive(Debug, Clone, Deserialize)]
struct Crumb {
    label: String,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PageAction {
    #[serde(default)]
    label: String,
    handler: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    variant: Option<String>,
}

/// Decodes list items, skipping (and logging) malformed entries.
fn decode<T: for<'de> Deserialize<'de>>(field: &str, items: Vec<Value>) -> Vec<(usize, T, Value)> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<T>(raw.clone()) {
            Ok(item) => Some((index, item, raw)),
            Err(err) => {
                logging::warn!("skipping malformed sh-page-header {field} item {index}: {err}");
                None
            }
        })
        .collect()
}

struct PageHeader;

impl Element for PageHeader {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let theme = props.token::<Theme>("theme");
        let crumbs = decode::<Crumb>("breadcrumb", props.list("breadcrumb"));
        let actions = decode::<PageAction>("actions", props.list("actions"));
        let last = crumbs.len().saturating_sub(1);

        let breadcrumb = (!crumbs.is_empty()).then(|| {
            let mut nav = el("nav")
                .part("breadcrumb")
                .class("breadcrumb")
                .attr("aria-label", "Fil d'Ariane")
                .child(el(icon::TAG).attr("name", "Home").attr("size", "xs"));
            for (position, (index, crumb, _)) in crumbs.iter().enumerate() {
                if position > 0 {
                    nav = nav.child(el("span").class("breadcrumb-separator").child("/"));
                }
                let current = position == last;
                nav = nav.child(
                    el("a")
                        .part(&format!("crumb-{index}"))
                        .attr("href", crumb.href.as_deref().unwrap_or("javascript:void(0)"))
                        .class(format!(
                            "breadcrumb-item {}",
                            if current { "active" } else { "" }
                        ))
                        .attr("aria-current", if current { "page" } else { "false" })
                        .on(DomEvent::Click, Action::with_arg("crumb", index.to_string()))
                        .child(crumb.label.clone()),
                );
            }
            nav
        });

        let action_bar = (!actions.is_empty()).then(|| {
            el("div")
                .part("actions")
                .class("actions")
                .attr("role", "group")
                .attr("aria-label", "Actions de page")
                .children(actions.iter().map(|(index, action, _)| {
                    let variant = action
                        .variant
                        .as_deref()
                        .and_then(ButtonVariant::from_token)
                        .unwrap_or(ButtonVariant::Secondary);
                    el(button::TAG)
                        .part(&format!("action-{index}"))
                        .class("page-action-btn")
                        .attr("variant", variant.token())
                        .attr("size", "md")
                        .attr("icon-before", action.icon.clone().unwrap_or_default())
                        .attr("data-theme", theme.token())
                        .bool_attr("hide-text-mobile", variant == ButtonVariant::Ghost)
                        .bool_attr("icon-only", action.label.is_empty())
                        .listen("sh-button-click", Action::with_arg("action", index.to_string()))
                        .child(action.label.clone())
                }))
        });

        let subtitle = props
            .optional_text("subtitle")
            .map(|subtitle| el("p").class("subtitle").child(subtitle));

        el("div")
            .part("page-header")
            .class("page-header")
            .child(
                el("div")
                    .class("container")
                    .maybe_child(breadcrumb)
                    .child(
                        el("div")
                            .class("content")
                            .child(
                                el("div")
                                    .class("text-content")
                                    .child(el("h1").part("title").class("title").child(props.text("title")))
                                    .maybe_child(subtitle),
                            )
                            .maybe_child(action_bar),
                    ),
            )
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
        if !action.is("crumb") {
            return;
        }
        let Some(index) = action.arg().and_then(|arg| arg.parse::<usize>().ok()) else {
            return;
        };
        let Some(item) = ctx.props().list("breadcrumb").get(index).cloned() else {
            return;
        };
        ctx.emit(CustomEvent::new(
            "sh-breadcrumb-click",
            json!({ "item": item, "index": index }),
        ));
    }

    fn on_child_event(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &CustomEvent) {
        if !action.is("action") {
            return;
        }
        let Some(index) = action.arg().and_then(|arg| arg.parse::<usize>().ok()) else {
            return;
        };
        let actions = decode::<PageAction>("actions", ctx.props().list("actions"));
        let Some((_, entry, raw)) = actions.into_iter().find(|(i, ..)| *i == index) else {
            return;
        };
        ctx.emit(CustomEvent::new(
            &format!("sh-action-{}", entry.handler),
            json!({ "action": raw }),
        ));
    }
}

fn create() -> Box<dyn Element> {
    Box::new(PageHeader)
}

fn styles() -> StyleSheet {
    let light = palette::surface(Theme::Light);
    let dark = palette::surface(Theme::Dark);
    StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".page-header")
                .decl("padding", format!("{} 0", palette::SPACE_LG))
                .decl("border-bottom", format!("1px solid {}", dark.border))
                .decl("color", dark.text),
        )
        .rule(
            StyleRule::new(":host([data-theme=\"light\"]) .page-header")
                .decl("border-bottom-color", light.border)
                .decl("color", light.text),
        )
        .rule(
            StyleRule::new(".breadcrumb")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_SM)
                .decl("margin-bottom", palette::SPACE_SM)
                .decl("font-size", "0.875rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".breadcrumb-item")
                .decl("color", "inherit")
                .decl("text-decoration", "none"),
        )
        .rule(StyleRule::new(".breadcrumb-item:hover").decl("color", palette::BRAND))
        .rule(
            StyleRule::new(".breadcrumb-item.active")
                .decl("font-weight", "600")
                .decl("color", palette::BRAND),
        )
        .rule(
            StyleRule::new(".content")
                .decl("display", "flex")
                .decl("flex-wrap", "wrap")
                .decl("align-items", "center")
                .decl("justify-content", "space-between")
                .decl("gap", palette::SPACE_MD),
        )
        .rule(
            StyleRule::new(".title")
                .decl("margin", "0")
                .decl("font-size", "1.875rem")
                .decl("font-weight", "700"),
        )
        .rule(
            StyleRule::new(".subtitle")
                .decl("margin", "0.25rem 0 0")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".actions")
                .decl("display", "flex")
                .decl("flex-wrap", "wrap")
                .decl("gap", palette::SPACE_SM),
        )
}

/// Definition of `sh-page-header`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("title", ""),
            PropertyDescriptor::text("subtitle", ""),
            PropertyDescriptor::list("breadcrumb"),
            PropertyDescriptor::list("actions"),
            theme_property(),
        ])
        .event("sh-breadcrumb-click", "{ item, index }")
        .event("sh-action-handler", "{ action }; emitted as `sh-action-{handler}` per action")
        .styles(styles())
}
