//! `sh-search-input`: search field with optional debounce and clear button.

use element_runtime::prelude::*;
use serde_json::json;

use crate::icon;
use crate::palette;
use crate::theme_property;

/// Tag of the search input element.
pub const TAG: &str = "sh-search-input";

#[derive(Default)]
struct SearchInput {
    pending: Option<TimerHandle>,
}

impl SearchInput {
    fn emit_search(ctx: &mut ElementContext<'_>) {
        let value = ctx.props().text("value");
        ctx.emit(CustomEvent::new("sh-search", json!({ "value": value })));
    }
}

impl Element for SearchInput {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let value = props.text("value");
        let clear = (props.flag("clearable") && !value.is_empty()).then(|| {
            el("button")
                .part("clear")
                .class("clear-button")
                .attr("aria-label", "Effacer la recherche")
                .on(DomEvent::Click, "clear")
                .child(el(icon::TAG).attr("name", "X").attr("size", "sm"))
        });

        el("div")
            .class("search-container")
            .child(
                el(icon::TAG)
                    .class("search-icon")
                    .attr("name", "Search")
                    .attr("size", "md"),
            )
            .child(
                el("input")
                    .part("input")
                    .attr("type", "text")
                    .class("search-input")
                    .attr("value", value)
                    .attr("placeholder", props.text("placeholder"))
                    .bool_attr("disabled", props.flag("disabled"))
                    .attr("aria-label", "Recherche")
                    .on(DomEvent::Input, "input"),
            )
            .maybe_child(clear)
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, interaction: &Interaction) {
        match action.name() {
            "input" => {
                let value = interaction.input_value().unwrap_or_default().to_string();
                if !ctx.update("value", value.as_str()) {
                    return;
                }
                ctx.emit(CustomEvent::new("sh-search-change", json!({ "value": value })));

                if let Some(previous) = self.pending.take() {
                    ctx.cancel(previous);
                }
                let debounce = ctx.props().number("debounce").unwrap_or(0.0);
                if debounce > 0.0 {
                    self.pending = Some(ctx.set_timeout(debounce as u64, "search"));
                } else {
                    Self::emit_search(ctx);
                }
            }
            "clear" => {
                if let Some(previous) = self.pending.take() {
                    ctx.cancel(previous);
                }
                if !ctx.update("value", "") {
                    return;
                }
                ctx.emit(CustomEvent::new("sh-search-clear", json!({})));
                Self::emit_search(ctx);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, ctx: &mut ElementContext<'_>, action: &Action) {
        if action.is("search") {
            self.pending = None;
            Self::emit_search(ctx);
        }
    }

    fn disconnected(&mut self) {
        self.pending = None;
    }
}

fn create() -> Box<dyn Element> {
    Box::<SearchInput>::default()
}

fn styles() -> StyleSheet {
    let light = palette::surface(Theme::Light);
    let dark = palette::surface(Theme::Dark);
    StyleSheet::new()
        .rule(
            StyleRule::new(":host")
                .decl("display", "block")
                .decl("--search-bg", dark.background)
                .decl("--search-border", dark.border)
                .decl("--search-text", dark.text)
                .decl("--search-muted", dark.muted),
        )
        .rule(
            StyleRule::new(":host([data-theme=\"light\"])")
                .decl("--search-bg", light.background)
                .decl("--search-border", light.border)
                .decl("--search-text", light.text)
                .decl("--search-muted", light.muted),
        )
        .rule(
            StyleRule::new(".search-container")
                .decl("position", "relative")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("width", "100%"),
        )
        .rule(
            StyleRule::new(".search-input")
                .decl("width", "100%")
                .decl("padding", "0.625rem 2.5rem")
                .decl("background", "var(--search-bg)")
                .decl("border", "1px solid var(--search-border)")
                .decl("border-radius", palette::RADIUS_LG)
                .decl("color", "var(--search-text)")
                .decl("outline", "none")
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(StyleRule::new(".search-input::placeholder").decl("color", "var(--search-muted)"))
        .rule(
            StyleRule::new(".search-input:focus")
                .decl("border-color", palette::FOCUS_RING)
                .decl("box-shadow", "0 0 0 3px rgba(139, 92, 246, 0.1)"),
        )
        .rule(
            StyleRule::new(".search-input:disabled")
                .decl("opacity", "0.5")
                .decl("cursor", "not-allowed"),
        )
        .rule(
            StyleRule::new(".search-icon")
                .decl("position", "absolute")
                .decl("left", "0.75rem")
                .decl("color", "var(--search-muted)")
                .decl("pointer-events", "none"),
        )
        .rule(
            StyleRule::new(".clear-button")
                .decl("position", "absolute")
                .decl("right", "0.5rem")
                .decl("display", "flex")
                .decl("padding", "0.25rem")
                .decl("background", "transparent")
                .decl("border", "none")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("color", "var(--search-muted)")
                .decl("cursor", "pointer"),
        )
        .rule(StyleRule::new(".clear-button:hover").decl("color", "var(--search-text)"))
}

/// Definition of `sh-search-input`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("value", ""),
            PropertyDescriptor::text("placeholder", "Rechercher..."),
            PropertyDescriptor::number("debounce", 0.0),
            PropertyDescriptor::boolean("clearable", false),
            PropertyDescriptor::boolean("disabled", false),
            theme_property(),
        ])
        .event("sh-search-change", "{ value }")
        .event("sh-search", "{ value }")
        .event("sh-search-clear", "{}")
        .styles(styles())
}
