//! `sh-button`: action button with variants, loading state, and optional icons.

use element_runtime::prelude::*;
use serde_json::json;

use crate::icon;
use crate::palette;
use crate::tokens::{ButtonType, ButtonVariant, Size};

/// Tag of the button element.
pub const TAG: &str = "sh-button";

struct Button;

impl Element for Button {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let loading = props.flag("loading");
        let busy = props.flag("disabled") || loading;
        let icon = |field: &str| {
            props
                .optional_text(field)
                .filter(|name| !loading && !name.is_empty())
                .map(|name| el(icon::TAG).attr("name", name))
        };

        el("button")
            .part("button")
            .attr("type", props.token::<ButtonType>("button_type").token())
            .class(format!(
                "{} {} {}",
                props.token::<ButtonVariant>("variant").token(),
                props.token::<Size>("size").token(),
                if loading { "loading" } else { "" },
            ))
            .bool_attr("disabled", busy)
            .attr("aria-busy", if loading { "true" } else { "false" })
            .on(DomEvent::Click, "click")
            .maybe_child(loading.then(spinner))
            .maybe_child(icon("icon_before"))
            .child(el("span").class("button-text").child(slot()))
            .maybe_child(icon("icon_after"))
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
        let props = ctx.props();
        if action.is("click") && !props.flag("disabled") && !props.flag("loading") {
            ctx.emit(CustomEvent::new("sh-button-click", json!({})));
        }
    }
}

fn spinner() -> ElementNode {
    el("svg")
        .class("spinner")
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .child(
            el("circle")
                .attr("cx", "12")
                .attr("cy", "12")
                .attr("r", "10")
                .attr("stroke-width", "3")
                .attr("stroke-opacity", "0.25"),
        )
        .child(
            el("path")
                .attr("d", "M12 2a10 10 0 0 1 10 10")
                .attr("stroke-width", "3")
                .attr("stroke-linecap", "round"),
        )
}

fn create() -> Box<dyn Element> {
    Box::new(Button)
}

fn styles() -> StyleSheet {
    let danger = TokenRef::new("color-danger-600", "#dc2626");
    StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "inline-block"))
        .rule(
            StyleRule::new("button")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("justify-content", "center")
                .decl("gap", palette::SPACE_SM)
                .decl("font-weight", "500")
                .decl("border", "none")
                .decl("cursor", "pointer")
                .decl("position", "relative")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(
            StyleRule::new(".sm")
                .decl("padding", "0.375rem 0.75rem")
                .decl("font-size", "0.875rem")
                .decl("height", "2rem"),
        )
        .rule(
            StyleRule::new(".md")
                .decl("padding", "0.5rem 1rem")
                .decl("font-size", "1rem")
                .decl("height", "2.5rem"),
        )
        .rule(
            StyleRule::new(".lg")
                .decl("padding", "0.75rem 1.5rem")
                .decl("font-size", "1.125rem")
                .decl("height", "3rem"),
        )
        .rule(
            StyleRule::new(".primary")
                .decl("background", palette::BRAND)
                .decl("color", "white"),
        )
        .rule(StyleRule::new(".primary:hover:not(:disabled)").decl("background", palette::BRAND_HOVER))
        .rule(
            StyleRule::new(".secondary")
                .decl("background", palette::surface(Theme::Light).background)
                .decl("color", palette::surface(Theme::Light).text)
                .decl("border", format!("1px solid {}", palette::surface(Theme::Light).border)),
        )
        .rule(
            StyleRule::new(".ghost")
                .decl("background", "transparent")
                .decl("color", palette::BRAND),
        )
        .rule(StyleRule::new(".ghost:hover:not(:disabled)").decl("background", "rgba(139, 92, 246, 0.1)"))
        .rule(
            StyleRule::new(".danger")
                .decl("background", danger)
                .decl("color", "white"),
        )
        .rule(
            StyleRule::new("button:disabled")
                .decl("opacity", "0.5")
                .decl("cursor", "not-allowed"),
        )
        .rule(
            StyleRule::new("button:focus-visible")
                .decl("outline", format!("2px solid {}", palette::FOCUS_RING))
                .decl("outline-offset", "2px"),
        )
        .rule(StyleRule::new(".loading").decl("pointer-events", "none"))
        .rule(
            StyleRule::new(".spinner")
                .decl("animation", "sh-spin 1s linear infinite")
                .decl("width", "1em")
                .decl("height", "1em"),
        )
        .rule(StyleRule::new(":host([icon-only]) .button-text").decl("display", "none"))
        .rule(
            StyleRule::new(":host([icon-only]) button")
                .decl("padding", palette::SPACE_SM)
                .decl("aspect-ratio", "1"),
        )
}

/// Definition of `sh-button`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<ButtonVariant>("variant"),
            PropertyDescriptor::token::<Size>("size"),
            PropertyDescriptor::boolean("disabled", false),
            PropertyDescriptor::boolean("loading", false),
            PropertyDescriptor::optional_text("icon_before"),
            PropertyDescriptor::optional_text("icon_after"),
            PropertyDescriptor::token::<ButtonType>("button_type").attribute("type"),
            PropertyDescriptor::boolean("hide_text_mobile", false).reflect(),
            PropertyDescriptor::boolean("icon_only", false).reflect(),
        ])
        .event("sh-button-click", "{}")
        .default_slot()
        .styles(styles())
}
