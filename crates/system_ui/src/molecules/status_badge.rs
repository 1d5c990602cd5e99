//! `sh-status-badge`: stock status pill with an optional pulsing indicator.

use element_runtime::prelude::*;

use crate::palette;
use crate::tokens::{StockStatus, Tone};

/// Tag of the status badge element.
pub const TAG: &str = "sh-status-badge";

struct StatusBadge;

impl Element for StatusBadge {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let (label, tone, pulse) = props.token::<StockStatus>("status").presentation();
        let label = props
            .optional_text("label")
            .filter(|custom| !custom.is_empty())
            .unwrap_or_else(|| label.to_string());
        let indicator = props.flag("show_indicator").then(|| {
            el("span")
                .part("indicator")
                .class(format!("indicator {}", if pulse { "pulse" } else { "" }))
        });

        el("span")
            .part("badge")
            .class(format!("status-badge {}", tone.token()))
            .maybe_child(indicator)
            .child(el("span").child(label))
            .into()
    }
}

fn create() -> Box<dyn Element> {
    Box::new(StatusBadge)
}

fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "inline-flex"))
        .rule(
            StyleRule::new(".status-badge")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("gap", "0.375rem")
                .decl("padding", "0.25rem 0.75rem")
                .decl("border-radius", "9999px")
                .decl("font-size", "0.75rem")
                .decl("font-weight", "500")
                .decl("white-space", "nowrap"),
        )
        .rule(
            StyleRule::new(".indicator")
                .decl("width", "0.5rem")
                .decl("height", "0.5rem")
                .decl("border-radius", "9999px")
                .decl("background", "currentColor"),
        )
        .rule(StyleRule::new(".pulse").decl("animation", "sh-pulse 2s ease-in-out infinite"));

    for rule in palette::tone_rules("", true) {
        sheet = sheet.rule(rule);
    }
    for tone in [Tone::Success, Tone::Warning, Tone::Danger, Tone::Info] {
        let colors = palette::tone_colors(tone, Theme::Dark);
        sheet = sheet.rule(
            StyleRule::new(format!(
                ":host([data-theme=\"dark\"]) .{} .indicator",
                tone.token()
            ))
            .decl("background", colors.foreground),
        );
    }
    sheet
}

/// Definition of `sh-status-badge`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<StockStatus>("status"),
            PropertyDescriptor::boolean("show_indicator", true),
            PropertyDescriptor::optional_text("label"),
        ])
        .styles(styles())
}
