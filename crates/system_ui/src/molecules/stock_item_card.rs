//! `sh-stock-item-card`: inventory line with status badge, metrics, and row actions.

use element_runtime::prelude::*;
use serde_json::json;

use crate::molecules::{button, status_badge};
use crate::palette;
use crate::theme_property;
use crate::tokens::StockLevel;

/// Tag of the stock item card element.
pub const TAG: &str = "sh-stock-item-card";

/// Row actions as (action, icon, label, aria prefix, event).
const ACTIONS: [(&str, &str, &str, &str, &str); 3] = [
    ("view", "Eye", "Voir", "Voir les détails de", "sh-view-click"),
    ("edit", "Edit", "Éditer", "Éditer", "sh-edit-click"),
    ("delete", "Trash2", "Supprimer", "Supprimer", "sh-delete-click"),
];

struct StockItemCard;

fn metric(value: String, label: &str) -> ElementNode {
    el("div")
        .class("metric")
        .child(el("div").class("metric-value").child(value))
        .child(el("div").class("metric-label").child(label))
}

impl Element for StockItemCard {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let name = props.text("name");
        let level = props.token::<StockLevel>("status");
        let loading = props.flag("loading");

        let actions = ACTIONS.iter().map(|(action, icon, label, aria, _)| {
            el(button::TAG)
                .part(action)
                .attr("variant", "ghost")
                .attr("size", "sm")
                .attr("icon-before", *icon)
                .bool_attr("disabled", loading)
                .attr("aria-label", format!("{aria} {name}"))
                .listen("sh-button-click", Action::with_arg("action", *action))
                .child(*label)
        });

        el("div")
            .part("card")
            .class("stock-card")
            .attr("role", "article")
            .attr("aria-label", format!("Carte produit {name}"))
            .child(
                el("div")
                    .class("header")
                    .child(
                        el("div")
                            .class("header-info")
                            .child(el("div").class("name").child(name.clone()))
                            .child(el("div").class("sku").child(props.text("sku"))),
                    )
                    .child(
                        el(status_badge::TAG)
                            .attr("status", level.status().token())
                            .attr("size", "sm"),
                    ),
            )
            .child(
                el("div")
                    .part("metrics")
                    .class("metrics")
                    .child(metric(props.text("quantity"), "Quantité"))
                    .maybe_child(props.optional_text("value").map(|v| metric(v, "Valeur")))
                    .maybe_child(
                        props
                            .optional_text("location")
                            .map(|l| metric(l, "Emplacement")),
                    ),
            )
            .child(slot())
            .child(el("div").class("actions").children(actions))
            .into()
    }

    fn on_child_event(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &CustomEvent) {
        let props = ctx.props();
        if !action.is("action") || props.flag("loading") {
            return;
        }
        let Some((_, _, _, _, event)) = ACTIONS
            .iter()
            .find(|(name, ..)| Some(*name) == action.arg())
        else {
            return;
        };
        let detail = json!({
            "name": props.text("name"),
            "sku": props.text("sku"),
            "status": props.token::<StockLevel>("status").token(),
        });
        ctx.emit(CustomEvent::new(event, detail));
    }
}

fn create() -> Box<dyn Element> {
    Box::new(StockItemCard)
}

fn styles() -> StyleSheet {
    let dark = palette::surface(Theme::Dark);
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".stock-card")
                .decl("display", "flex")
                .decl("flex-direction", "column")
                .decl("gap", palette::SPACE_MD)
                .decl("padding", palette::SPACE_LG)
                .decl("border", "1px solid")
                .decl("border-radius", palette::RADIUS_LG),
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
            StyleRule::new(".sku")
                .decl("font-size", "0.75rem")
                .decl("font-family", "monospace")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".metrics")
                .decl("display", "grid")
                .decl("grid-template-columns", "repeat(auto-fit, minmax(6rem, 1fr))")
                .decl("gap", palette::SPACE_MD),
        )
        .rule(
            StyleRule::new(".metric-value")
                .decl("font-size", "1.25rem")
                .decl("font-weight", "700"),
        )
        .rule(
            StyleRule::new(".metric-label")
                .decl("font-size", "0.75rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".actions")
                .decl("display", "flex")
                .decl("gap", palette::SPACE_SM)
                .decl("padding-top", palette::SPACE_SM)
                .decl("border-top", format!("1px solid {}", dark.border)),
        )
}

/// Definition of `sh-stock-item-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("name", ""),
            PropertyDescriptor::text("sku", ""),
            PropertyDescriptor::text("quantity", "0"),
            PropertyDescriptor::text("value", ""),
            PropertyDescriptor::text("location", ""),
            PropertyDescriptor::token::<StockLevel>("status"),
            PropertyDescriptor::boolean("loading", false),
            theme_property(),
        ])
        .event("sh-view-click", "{ name, sku, status }")
        .event("sh-edit-click", "{ name, sku, status }")
        .event("sh-delete-click", "{ name, sku, status }")
        .default_slot()
        .styles(styles())
}
