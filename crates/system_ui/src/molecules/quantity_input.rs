//! `sh-quantity-input`: numeric field with an explicit synchronise button.
//!
//! Edits mark the control dirty; the confirm button is only enabled while dirty and
//! publishes the value as a non-bubbling `sync` event.

use element_runtime::prelude::*;
use serde_json::Value;

use crate::atoms::input;
use crate::icon;

/// Tag of the quantity input element.
pub const TAG: &str = "sh-quantity-input";

struct QuantityInput;

impl Element for QuantityInput {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let hide_arrows = props.flag("hide_arrows");
        el("div")
            .class("container")
            .child(
                el(input::TAG)
                    .part("field")
                    .attr("type", "number")
                    .class(if hide_arrows { "hide-arrows" } else { "" })
                    .prop("value", props.text("value"))
                    .prop("hide_arrows", hide_arrows)
                    .listen("sh-input-change", "changed"),
            )
            .child(
                el("button")
                    .part("sync")
                    .class("sync-button")
                    .bool_attr("disabled", !props.flag("dirty"))
                    .attr("title", "Synchroniser")
                    .attr("aria-label", "Synchroniser la quantité")
                    .on(DomEvent::Click, "sync")
                    .child(
                        el(icon::TAG)
                            .attr("name", "RefreshCw")
                            .attr("size", "sm")
                            .attr("color", "inherit"),
                    ),
            )
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
        if !action.is("sync") || !ctx.props().flag("dirty") {
            return;
        }
        let value = ctx.props().text("value");
        if ctx.update("dirty", false) {
            ctx.emit(CustomEvent::new("sync", Value::String(value)).local());
        }
    }

    fn on_child_event(&mut self, ctx: &mut ElementContext<'_>, action: &Action, event: &CustomEvent) {
        if !action.is("changed") {
            return;
        }
        let value = event
            .detail
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if ctx.update("value", value) {
            ctx.update("dirty", true);
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(QuantityInput)
}

fn styles() -> StyleSheet {
    StyleSheet::new()
        .rule(
            StyleRule::new(".container")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", "30px")
                .decl("width", "fit-content"),
        )
        .rule(
            StyleRule::new(".sync-button")
                .decl("background-color", "#6200ea")
                .decl("border", "none")
                .decl("color", "white")
                .decl("cursor", "pointer")
                .decl("padding", "8px 12px")
                .decl("border-radius", "6px")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("justify-content", "center")
                .decl("transition", "background-color 0.2s ease, opacity 0.2s ease"),
        )
        .rule(StyleRule::new(".sync-button:hover:not(:disabled)").decl("background-color", "#7c3aed"))
        .rule(
            StyleRule::new(".sync-button:disabled")
                .decl("opacity", "0.5")
                .decl("cursor", "not-allowed"),
        )
}

/// Definition of `sh-quantity-input`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("value", ""),
            PropertyDescriptor::boolean("dirty", false),
            PropertyDescriptor::boolean("hide_arrows", false),
        ])
        .event("sync", "string: the confirmed value")
        .styles(styles())
}
