//! `sh-stat-card`: selectable statistic tile colored by risk level.

use element_runtime::prelude::*;
use serde_json::json;

use crate::palette;
use crate::theme_property;
use crate::tokens::{RiskLevel, Tone};

/// Tag of the stat card element.
pub const TAG: &str = "sh-stat-card";

struct StatCard;

impl Element for StatCard {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let label = props.text("label");
        let value = props.text("value");
        let selected = props.flag("selected");

        el("div")
            .part("card")
            .class(format!("stat-card {}", if selected { "selected" } else { "" }))
            .attr("role", "button")
            .attr("tabindex", "0")
            .attr("aria-label", format!("{label}: {value}"))
            .attr("aria-pressed", if selected { "true" } else { "false" })
            .on(DomEvent::Click, "toggle")
            .on(DomEvent::KeyDown, "toggle")
            .maybe_child(selected.then(|| el("span").class("sr-only").child("Sélectionné")))
            .child(
                el("div")
                    .part("value")
                    .class("value")
                    .attr("aria-live", "polite")
                    .child(slot().fallback(value)),
            )
            .child(el("div").class("label").child(label))
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, interaction: &Interaction) {
        if !action.is("toggle") {
            return;
        }
        if let Interaction::KeyDown(key) = interaction {
            if !key.is_activation() {
                return;
            }
        }
        let selected = !ctx.props().flag("selected");
        if !ctx.update("selected", selected) {
            return;
        }

        let props = ctx.props();
        let detail = json!({
            "label": props.text("label"),
            "value": props.text("value"),
            "riskLevel": props.token::<RiskLevel>("risk_level").token(),
            "selected": selected,
        });
        ctx.emit(CustomEvent::new("sh-stat-click", detail));
    }
}

fn create() -> Box<dyn Element> {
    Box::new(StatCard)
}

fn styles() -> StyleSheet {
    let dark = palette::surface(Theme::Dark);
    let light = palette::surface(Theme::Light);
    let mut sheet = StyleSheet::new()
        .rule(
            StyleRule::new(":host")
                .decl("display", "block")
                .decl("--stat-accent", palette::BRAND),
        )
        .rule(
            StyleRule::new(".stat-card")
                .decl("padding", palette::SPACE_LG)
                .decl("background", dark.background)
                .decl("border", format!("2px solid {}", dark.border))
                .decl("border-radius", palette::RADIUS_LG)
                .decl("color", dark.text)
                .decl("cursor", "pointer")
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(
            StyleRule::new(":host([data-theme=\"light\"]) .stat-card")
                .decl("background", light.background)
                .decl("border-color", light.border)
                .decl("color", light.text),
        )
        .rule(StyleRule::new(".stat-card:hover").decl("border-color", "var(--stat-accent)"))
        .rule(
            StyleRule::new(":host([selected]) .stat-card")
                .decl("border-color", "var(--stat-accent)")
                .decl("box-shadow", "0 0 0 3px rgba(139, 92, 246, 0.2)"),
        )
        .rule(
            StyleRule::new(".stat-card:focus-visible")
                .decl("outline", format!("2px solid {}", palette::FOCUS_RING))
                .decl("outline-offset", "2px"),
        )
        .rule(
            StyleRule::new(".value")
                .decl("font-size", "2rem")
                .decl("font-weight", "700")
                .decl("color", "var(--stat-accent)"),
        )
        .rule(
            StyleRule::new(".label")
                .decl("margin-top", "0.25rem")
                .decl("font-size", "0.875rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".sr-only")
                .decl("position", "absolute")
                .decl("width", "1px")
                .decl("height", "1px")
                .decl("overflow", "hidden")
                .decl("clip", "rect(0, 0, 0, 0)")
                .decl("white-space", "nowrap"),
        );

    let risks = [
        (RiskLevel::Critical, Tone::Danger),
        (RiskLevel::High, Tone::Warning),
        (RiskLevel::Medium, Tone::Info),
        (RiskLevel::Low, Tone::Success),
    ];
    for (risk, tone) in risks {
        sheet = sheet.rule(
            StyleRule::new(format!(":host([risk-level=\"{}\"])", risk.token()))
                .decl("--stat-accent", palette::tone_colors(tone, Theme::Dark).foreground),
        );
    }
    sheet
}

/// Definition of `sh-stat-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("label", ""),
            PropertyDescriptor::text("value", "0"),
            PropertyDescriptor::token::<RiskLevel>("risk_level").reflect(),
            PropertyDescriptor::boolean("selected", false).reflect(),
            theme_property(),
        ])
        .event("sh-stat-click", "{ label, value, riskLevel, selected }")
        .default_slot()
        .styles(styles())
}
