//! `sh-ia-alert-banner`: collapsible banner summarising AI stock alerts.
//!
//! `alerts` items are `{ product, message }` objects; a click on one re-emits it as the
//! event detail.

use element_runtime::prelude::*;
use serde_json::{json, Value};

use crate::icon;
use crate::palette;
use crate::theme_property;
use crate::tokens::{Severity, Tone};

/// Tag of the alert banner element.
pub const TAG: &str = "sh-ia-alert-banner";

struct IaAlertBanner;

fn field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl Element for IaAlertBanner {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let count = props.number("count").unwrap_or(0.0);
        let severity = props.token::<Severity>("severity");
        let expanded = props.flag("expanded");
        let alerts = props.list("alerts");

        let details = (expanded && !alerts.is_empty()).then(|| {
            el("div")
                .part("details")
                .class("alert-details")
                .child(
                    el("div")
                        .class("details-subtitle")
                        .child("Suggestions détaillées disponibles dans chaque carte de stock"),
                )
                .child(
                    el("ul").class("alerts-list").children(alerts.iter().enumerate().map(
                        |(index, alert)| {
                            el("li")
                                .part(&format!("alert-{index}"))
                                .class("alert-item")
                                .on(DomEvent::Click, Action::with_arg("item", index.to_string()))
                                .child(el("span").class("product-name").child(field(alert, "product")))
                                .child(
                                    el(icon::TAG)
                                        .class("warning-icon")
                                        .attr("name", "AlertTriangle")
                                        .attr("size", "xs"),
                                )
                                .child(el("span").child(field(alert, "message")))
                        },
                    )),
                )
        });

        el("div")
            .part("banner")
            .class("alert-banner")
            .attr("role", "alert")
            .attr("aria-live", "polite")
            .child(
                el("div")
                    .part("header")
                    .class("alert-header")
                    .on(DomEvent::Click, "toggle")
                    .child(
                        el("div")
                            .class("icon-wrapper")
                            .child(el(icon::TAG).attr("name", "Sparkles").attr("size", "md")),
                    )
                    .child(
                        el("div")
                            .class("alert-content")
                            .child(
                                el("div")
                                    .class("alert-title")
                                    .child(el("span").class("count-badge").child(format!("🤖 {count}")))
                                    .child(el("span").class("alert-message").child(props.text("message"))),
                            )
                            .child(
                                el("div").class("badges-row").child(
                                    el("span")
                                        .part("severity")
                                        .class(format!("severity-badge severity-{}", severity.token()))
                                        .child(format!("{count} {}", severity.label())),
                                ),
                            ),
                    )
                    .child(
                        el("button")
                            .part("toggle")
                            .class("toggle-button")
                            .attr("aria-expanded", if expanded { "true" } else { "false" })
                            .attr(
                                "aria-label",
                                if expanded { "Masquer les détails" } else { "Afficher les détails" },
                            )
                            .on(DomEvent::Click, "toggle")
                            .child(
                                el(icon::TAG)
                                    .class(format!("toggle-icon {}", if expanded { "" } else { "collapsed" }))
                                    .attr("name", "ChevronUp")
                                    .attr("size", "sm"),
                            ),
                    ),
            )
            .maybe_child(details)
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
        match action.name() {
            "toggle" => {
                let expanded = !ctx.props().flag("expanded");
                if ctx.update("expanded", expanded) {
                    ctx.emit(CustomEvent::new("sh-ia-alert-toggle", json!({ "expanded": expanded })));
                }
            }
            "item" => {
                let alert = action
                    .arg()
                    .and_then(|arg| arg.parse::<usize>().ok())
                    .and_then(|index| ctx.props().list("alerts").get(index).cloned());
                if let Some(alert) = alert {
                    ctx.emit(CustomEvent::new("sh-ia-alert-item-click", alert));
                }
            }
            _ => {}
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(IaAlertBanner)
}

fn styles() -> StyleSheet {
    let dark = palette::surface(Theme::Dark);
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".alert-banner")
                .decl("border", "1px solid rgba(139, 92, 246, 0.3)")
                .decl("border-radius", palette::RADIUS_LG)
                .decl("background", "linear-gradient(135deg, rgba(139, 92, 246, 0.12), rgba(124, 58, 237, 0.04))")
                .decl("color", dark.text)
                .decl("overflow", "hidden"),
        )
        .rule(
            StyleRule::new(":host([data-theme=\"light\"]) .alert-banner")
                .decl("color", palette::surface(Theme::Light).text),
        )
        .rule(
            StyleRule::new(".alert-header")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_MD)
                .decl("padding", palette::SPACE_MD)
                .decl("cursor", "pointer"),
        )
        .rule(
            StyleRule::new(".icon-wrapper")
                .decl("display", "flex")
                .decl("padding", palette::SPACE_SM)
                .decl("border-radius", palette::RADIUS_MD)
                .decl("background", palette::BRAND)
                .decl("color", "white"),
        )
        .rule(StyleRule::new(".alert-content").decl("flex", "1"))
        .rule(
            StyleRule::new(".alert-title")
                .decl("display", "flex")
                .decl("gap", palette::SPACE_SM)
                .decl("font-weight", "600"),
        )
        .rule(
            StyleRule::new(".severity-badge")
                .decl("display", "inline-block")
                .decl("margin-top", "0.25rem")
                .decl("padding", "0.125rem 0.5rem")
                .decl("border-radius", "9999px")
                .decl("font-size", "0.75rem"),
        )
        .rule(
            StyleRule::new(".toggle-button")
                .decl("display", "flex")
                .decl("padding", "0.25rem")
                .decl("background", "transparent")
                .decl("border", "none")
                .decl("color", "inherit")
                .decl("cursor", "pointer"),
        )
        .rule(StyleRule::new(".toggle-icon").decl("transition", "transform 200ms ease"))
        .rule(StyleRule::new(".toggle-icon.collapsed").decl("transform", "rotate(180deg)"))
        .rule(
            StyleRule::new(".alert-details")
                .decl("padding", format!("0 {} {}", palette::SPACE_MD, palette::SPACE_MD)),
        )
        .rule(
            StyleRule::new(".details-subtitle")
                .decl("font-size", "0.75rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".alerts-list")
                .decl("margin", format!("{} 0 0", palette::SPACE_SM))
                .decl("padding", "0")
                .decl("list-style", "none"),
        )
        .rule(
            StyleRule::new(".alert-item")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_SM)
                .decl("padding", palette::SPACE_SM)
                .decl("border-radius", palette::RADIUS_MD)
                .decl("cursor", "pointer"),
        )
        .rule(StyleRule::new(".alert-item:hover").decl("background", "rgba(139, 92, 246, 0.1)"))
        .rule(StyleRule::new(".product-name").decl("font-weight", "600"));

    let severities = [
        (Severity::Critical, Tone::Danger),
        (Severity::Warning, Tone::Warning),
        (Severity::Info, Tone::Info),
    ];
    for (severity, tone) in severities {
        let colors = palette::tone_colors(tone, Theme::Dark);
        sheet = sheet.rule(
            StyleRule::new(format!(".severity-{}", severity.token()))
                .decl("background", colors.background)
                .decl("color", colors.foreground),
        );
    }
    sheet
}

/// Definition of `sh-ia-alert-banner`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::number("count", 0.0),
            PropertyDescriptor::token::<Severity>("severity"),
            PropertyDescriptor::text("message", "stocks nécessitent votre attention"),
            PropertyDescriptor::list("alerts"),
            PropertyDescriptor::boolean("expanded", true),
            theme_property(),
        ])
        .event("sh-ia-alert-toggle", "{ expanded }")
        .event("sh-ia-alert-item-click", "{ product, message }")
        .styles(styles())
}
