//! `sh-stock-card`: dashboard stock summary with fill level, value, and session actions.

use element_runtime::prelude::*;
use serde_json::json;

use crate::icon;
use crate::molecules::{button, status_badge};
use crate::palette;
use crate::theme_property;
use crate::tokens::StockLevel;

/// Tag of the stock card element.
pub const TAG: &str = "sh-stock-card";

struct StockCard;

fn action_button(part: &str, icon_name: &str, aria: String, loading: bool) -> ElementNode {
    el(button::TAG)
        .part(part)
        .attr("variant", "ghost")
        .attr("size", "sm")
        .attr("icon-before", icon_name)
        .bool_attr("disabled", loading)
        .attr("aria-label", aria)
        .listen("sh-button-click", Action::with_arg("action", part))
}

impl Element for StockCard {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let name = props.text("name");
        let level = props.token::<StockLevel>("status");
        let loading = props.flag("loading");
        let ia_count = props.number("ia_count").unwrap_or(0.0).max(0.0) as u64;

        let ia_badge = (ia_count > 0).then(|| {
            el("div")
                .part("ia-badge")
                .class("ia-badge")
                .child(el(icon::TAG).attr("name", "Sparkles").attr("size", "xs"))
                .child(format!("IA ({ia_count})"))
        });

        el("div")
            .part("card")
            .class("stock-card")
            .attr("role", "article")
            .attr("aria-label", format!("Carte de stock {name}"))
            .child(
                el("div")
                    .class("header")
                    .child(
                        el("div")
                            .class("header-info")
                            .child(el("div").class("name").child(name.clone()))
                            .child(
                                el("div")
                                    .class("meta")
                                    .maybe_child(props.optional_text("last_update").map(|when| {
                                        el("div").part("last-update").class("last-update").child(when)
                                    }))
                                    .maybe_child(props.optional_text("category").map(|category| {
                                        el("div")
                                            .part("category")
                                            .class("category")
                                            .child(format!("Catégorie: {category}"))
                                    })),
                            ),
                    )
                    .child(
                        el("div")
                            .class("badges")
                            .child(
                                el(status_badge::TAG)
                                    .attr("status", level.status().token())
                                    .attr("size", "sm"),
                            )
                            .maybe_child(ia_badge),
                    ),
            )
            .child(
                el("div")
                    .part("metrics")
                    .class("metrics")
                    .child(
                        el("div")
                            .class("metric")
                            .child(
                                el("div")
                                    .part("percentage")
                                    .class("metric-value")
                                    .child(format!("{}%", props.text("percentage"))),
                            )
                            .maybe_child(
                                props
                                    .optional_text("quantity")
                                    .map(|q| el("div").class("metric-sublabel").child(q)),
                            )
                            .child(el("div").class("metric-label").child("Quantité")),
                    )
                    .child(
                        el("div")
                            .class("metric")
                            .child(el("div").class("metric-value").child(props.text("value")))
                            .child(el("div").class("metric-label").child("Valeur")),
                    ),
            )
            .child(el("div").class("status-bar"))
            .child(slot())
            .child(
                el("div").class("session-section").child(
                    action_button(
                        "session",
                        "Palette",
                        format!("Enregistrer session pour {name}"),
                        loading,
                    )
                    .child("Enregistrer session"),
                ),
            )
            .child(
                el("div")
                    .class("actions")
                    .child(
                        action_button(
                            "details",
                            "Eye",
                            format!("Voir les détails de {name}"),
                            loading,
                        )
                        .child("Détails"),
                    )
                    .child(
                        el("div")
                            .class("icon-actions")
                            .child(
                                action_button("edit", "Edit", format!("Éditer {name}"), loading)
                                    .bool_attr("icon-only", true),
                            )
                            .child(
                                action_button(
                                    "delete",
                                    "Trash2",
                                    format!("Supprimer {name}"),
                                    loading,
                                )
                                .bool_attr("icon-only", true),
                            ),
                    ),
            )
            .into()
    }

    fn on_child_event(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &CustomEvent) {
        let props = ctx.props();
        if !action.is("action") || props.flag("loading") {
            return;
        }
        let name = props.text("name");
        let status = props.token::<StockLevel>("status").token();
        let (event, detail) = match action.arg() {
            Some("session") => ("sh-session-click", json!({ "name": name, "status": status })),
            Some("details") => (
                "sh-details-click",
                json!({ "name": name, "category": props.text("category"), "status": status }),
            ),
            Some("edit") => ("sh-edit-click", json!({ "name": name, "status": status })),
            Some("delete") => ("sh-delete-click", json!({ "name": name, "status": status })),
            _ => return,
        };
        ctx.emit(CustomEvent::new(event, detail));
    }
}

fn create() -> Box<dyn Element> {
    Box::new(StockCard)
}

fn styles() -> StyleSheet {
    let dark = palette::surface(Theme::Dark);
    let status_colors = [
        ("optimal", TokenRef::new("color-success-500", "#22c55e")),
        ("low", TokenRef::new("color-warning-500", "#f59e0b")),
        ("critical", TokenRef::new("color-danger-500", "#ef4444")),
        ("out-of-stock", TokenRef::new("color-neutral-700", "#374151")),
        ("overstocked", TokenRef::new("color-info-600", "#2563eb")),
    ];

    let mut sheet = StyleSheet::new().rule(
        StyleRule::new(":host")
            .decl("display", "block")
            .decl("--status-color", status_colors[0].1),
    );
    for (status, color) in status_colors {
        sheet = sheet.rule(
            StyleRule::new(format!(":host([status=\"{status}\"])")).decl("--status-color", color),
        );
    }
    sheet = sheet.rule(
        StyleRule::new(".stock-card")
            .decl("position", "relative")
            .decl("display", "flex")
            .decl("flex-direction", "column")
            .decl("gap", palette::SPACE_MD)
            .decl("padding", palette::SPACE_LG)
            .decl("border", "1px solid")
            .decl("border-radius", palette::RADIUS_LG)
            .decl("overflow", "hidden"),
    );
    for rule in palette::surface_rules(".stock-card") {
        sheet = sheet.rule(rule);
    }
    sheet
        .rule(
            StyleRule::new(".header")
                .decl("display", "flex")
                .decl("align-items", "flex-start")
                .decl("justify-content", "space-between")
                .decl("gap", palette::SPACE_SM),
        )
        .rule(
            StyleRule::new(".name")
                .decl("font-size", "1.125rem")
                .decl("font-weight", "600"),
        )
        .rule(
            StyleRule::new(".meta")
                .decl("display", "flex")
                .decl("flex-direction", "column")
                .decl("font-size", "0.75rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".badges")
                .decl("display", "flex")
                .decl("flex-direction", "column")
                .decl("align-items", "flex-end")
                .decl("gap", "0.25rem"),
        )
        .rule(
            StyleRule::new(".ia-badge")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("gap", "0.25rem")
                .decl("padding", "0.125rem 0.5rem")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("font-size", "0.75rem")
                .decl("color", palette::BRAND)
                .decl("border", format!("1px solid {}", palette::BRAND)),
        )
        .rule(
            StyleRule::new(".metrics")
                .decl("display", "grid")
                .decl("grid-template-columns", "1fr 1fr")
                .decl("gap", palette::SPACE_MD),
        )
        .rule(
            StyleRule::new(".metric-value")
                .decl("font-size", "1.5rem")
                .decl("font-weight", "700"),
        )
        .rule(
            StyleRule::new(".metric-sublabel, .metric-label")
                .decl("font-size", "0.75rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".status-bar")
                .decl("position", "absolute")
                .decl("top", "0")
                .decl("left", "0")
                .decl("right", "0")
                .decl("height", "3px")
                .decl("background", "var(--status-color)"),
        )
        .rule(
            StyleRule::new(".actions")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("justify-content", "space-between")
                .decl("padding-top", palette::SPACE_SM)
                .decl("border-top", format!("1px solid {}", dark.border)),
        )
        .rule(
            StyleRule::new(".icon-actions")
                .decl("display", "flex")
                .decl("gap", "0.25rem"),
        )
}

/// Definition of `sh-stock-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("name", ""),
            PropertyDescriptor::text("category", ""),
            PropertyDescriptor::text("last_update", ""),
            PropertyDescriptor::text("percentage", "0"),
            PropertyDescriptor::text("quantity", ""),
            PropertyDescriptor::text("value", ""),
            PropertyDescriptor::token::<StockLevel>("status").reflect(),
            PropertyDescriptor::number("ia_count", 0.0),
            PropertyDescriptor::boolean("loading", false),
            theme_property(),
        ])
        .event("sh-session-click", "{ name, status }")
        .event("sh-details-click", "{ name, category, status }")
        .event("sh-edit-click", "{ name, status }")
        .event("sh-delete-click", "{ name, status }")
        .default_slot()
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use element_runtime::{ElementRuntime, InstanceId};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted(attributes: &[(&str, &str)]) -> (ElementRuntime, InstanceId) {
        let mut runtime = ElementRuntime::new(crate::catalogue().expect("catalogue"));
        let id = runtime.create_element(TAG).expect("create");
        for (name, value) in attributes {
            runtime.set_attribute(id, name, value).expect("attribute");
        }
        runtime.flush();
        (runtime, id)
    }

    #[test]
    fn optional_header_lines_follow_their_values() {
        let (runtime, id) = mounted(&[("name", "Acrylique")]);
        assert!(runtime.part(id, "category").is_err());
        assert!(runtime.part(id, "last-update").is_err());
        assert!(runtime.part(id, "ia-badge").is_err());

        let (runtime, id) = mounted(&[
            ("name", "Acrylique"),
            ("category", "Peinture"),
            ("last-update", "il y a 3h"),
            ("ia-count", "2"),
        ]);
        assert_eq!(
            runtime.part(id, "category").map(|node| node.text_content()),
            Ok("Catégorie: Peinture".to_string())
        );
        assert_eq!(
            runtime.part(id, "ia-badge").map(|node| node.text_content()),
            Ok("IA (2)".to_string())
        );
        assert!(runtime.part(id, "last-update").is_ok());
    }

    #[test]
    fn percentage_carries_its_unit_and_status_reflects() {
        let (mut runtime, id) = mounted(&[("percentage", "65")]);
        assert_eq!(
            runtime.part(id, "percentage").map(|node| node.text_content()),
            Ok("65%".to_string())
        );

        runtime.set_property(id, "status", "critical").expect("status");
        runtime.flush();
        assert_eq!(runtime.attribute(id, "status"), Ok(Some("critical")));
    }
}
