//! `sh-stock-prediction-card`: depletion forecast for one stock with risk gauge,
//! confidence interval, and reorder recommendation.
//!
//! The gauge maps `days-until-rupture` onto a 0-100 risk scale that falls steeply over the
//! first three days and flattens after two weeks. Dates accept `YYYY-MM-DD` or any RFC 3339
//! timestamp and render in long French form (`5 mars 2025`); anything else renders verbatim.

use chrono::{Datelike, NaiveDate};
use element_runtime::prelude::*;
use serde_json::json;

use crate::icon;
use crate::palette;
use crate::theme_property;
use crate::tokens::PredictionRisk;

/// Tag of the stock prediction card element.
pub const TAG: &str = "sh-stock-prediction-card";

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

struct StockPredictionCard;

/// Gauge fill for a forecast of `days` until depletion.
pub fn risk_percentage(days: Option<f64>) -> f64 {
    let Some(days) = days else {
        return 0.0;
    };
    let raw = if days <= 3.0 {
        100.0 - days * 6.67
    } else if days <= 7.0 {
        80.0 - (days - 3.0) * 7.5
    } else if days <= 14.0 {
        50.0 - (days - 7.0) * 3.57
    } else {
        25.0 - (days - 14.0)
    };
    (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// Headline for a forecast of `days` until depletion.
pub fn prediction_message(days: Option<f64>) -> String {
    match days {
        None => "Aucun risque de rupture détecté".to_string(),
        Some(days) if days == 0.0 => "Rupture de stock imminente".to_string(),
        Some(days) => {
            let plural = if days > 1.0 { "s" } else { "" };
            format!("Rupture prévue dans {} jour{plural}", PropValue::from(days).display_text())
        }
    }
}

/// Long French form of a `YYYY-MM-DD` or RFC 3339 date.
pub fn format_date(raw: &str) -> String {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|date| {
            format!(
                "{} {} {}",
                date.day(),
                MONTHS[date.month0() as usize],
                date.year()
            )
        })
        .unwrap_or_else(|| raw.to_string())
}

fn detail_item(icon_name: &str, heading: &str, text: String) -> ElementNode {
    el("div")
        .class("detail-item")
        .child(
            el(icon::TAG)
                .class("detail-icon")
                .attr("name", icon_name)
                .attr("size", "xs"),
        )
        .child(
            el("div")
                .class("detail-text")
                .child(el("span").class("highlight").child(heading))
                .child(format!(" {text}")),
        )
}

impl Element for StockPredictionCard {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let name = props.text("stock_name");
        let risk = props.token::<PredictionRisk>("risk_level");
        let days = props.number("days_until_rupture");
        let clickable = props.flag("clickable");
        let icon_name = match risk {
            PredictionRisk::Critical | PredictionRisk::High => "AlertTriangle",
            PredictionRisk::Medium | PredictionRisk::Low => "TrendingDown",
        };

        let interval = match (
            days,
            props.number("days_until_rupture_pessimistic"),
            props.number("days_until_rupture_optimistic"),
        ) {
            (Some(_), Some(pessimistic), Some(optimistic)) => Some(
                el("div")
                    .part("interval")
                    .class("confidence-interval")
                    .child(el("span").class("interval-label").child(format!(
                        "Pessimiste: {}j",
                        PropValue::from(pessimistic).display_text()
                    )))
                    .child(el("span").class("interval-label").child(format!(
                        "Optimiste: {}j",
                        PropValue::from(optimistic).display_text()
                    ))),
            ),
            _ => None,
        };

        let details = (props.flag("show_details") && days.is_some()).then(|| {
            let rate = props.number("daily_consumption_rate").unwrap_or(0.0);
            let quantity = props.number("recommended_reorder_quantity").unwrap_or(0.0);
            let recommendation = props
                .optional_text("recommended_reorder_date")
                .filter(|_| quantity > 0.0)
                .map(|date| {
                    el("div")
                        .part("recommendation")
                        .class("recommendation")
                        .child(
                            el("div")
                                .class("recommendation-title")
                                .child(el(icon::TAG).attr("name", "Package").attr("size", "xs"))
                                .child("Action recommandée"),
                        )
                        .child(
                            el("div")
                                .class("recommendation-text")
                                .child("Commander ")
                                .child(el("span").class("highlight").child(format!(
                                    "{} unités",
                                    PropValue::from(quantity).display_text()
                                )))
                                .child(" avant le ")
                                .child(el("span").class("highlight").child(format_date(&date))),
                        )
                });

            el("div")
                .part("details")
                .class("details")
                .child(detail_item(
                    "TrendingDown",
                    "Consommation moyenne:",
                    format!("{rate:.2} unités/jour"),
                ))
                .maybe_child(props.optional_text("date_of_rupture").map(|date| {
                    detail_item("Clock", "Date de rupture estimée:", format_date(&date))
                }))
                .maybe_child(recommendation)
        });

        el("div")
            .part("card")
            .class("prediction-card")
            .attr("role", if clickable { "button" } else { "article" })
            .attr_if("tabindex", clickable.then_some("0"))
            .attr("aria-label", format!("Prédiction ML pour {name}"))
            .on(DomEvent::Click, "activate")
            .on(DomEvent::KeyDown, "activate")
            .child(
                el("div")
                    .class("header")
                    .child(
                        el("div")
                            .class("header-content")
                            .child(
                                el("div")
                                    .class("icon")
                                    .child(el(icon::TAG).attr("name", icon_name).attr("size", "sm")),
                            )
                            .child(
                                el("div")
                                    .class("header-info")
                                    .child(el("div").class("stock-name").child(name))
                                    .child(
                                        el("div")
                                            .part("message")
                                            .class("prediction-message")
                                            .child(format!(
                                                "🤖 IA détecte : {}",
                                                prediction_message(days)
                                            )),
                                    )
                                    .child(
                                        el("div")
                                            .class("prediction-method")
                                            .child("Analyse ML basée sur régression linéaire"),
                                    ),
                            ),
                    )
                    .child(
                        el("div")
                            .part("confidence")
                            .class("confidence-badge")
                            .child(el(icon::TAG).attr("name", "Info").attr("size", "xs"))
                            .child(el("span").child(format!("{}%", props.text("confidence")))),
                    ),
            )
            .child(
                el("div")
                    .class("progress-section")
                    .child(
                        el("div")
                            .class("progress-header")
                            .child(el("span").class("progress-label").child("Niveau de risque"))
                            .child(el("span").class("risk-level-label").child(risk.label())),
                    )
                    .child(
                        el("div").class("progress-bar-container").child(
                            el("div")
                                .part("progress")
                                .class("progress-bar")
                                .attr("style", format!("width: {}%", risk_percentage(days))),
                        ),
                    )
                    .maybe_child(interval),
            )
            .maybe_child(details)
            .child(slot())
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, interaction: &Interaction) {
        let props = ctx.props();
        if !action.is("activate") || !props.flag("clickable") {
            return;
        }
        if let Interaction::KeyDown(key) = interaction {
            if !key.is_activation() {
                return;
            }
        }
        let detail = json!({
            "stockId": props.text("stock_id"),
            "stockName": props.text("stock_name"),
            "riskLevel": props.token::<PredictionRisk>("risk_level").token(),
            "daysUntilRupture": props.get("days_until_rupture").to_json(),
        });
        ctx.emit(CustomEvent::new("sh-stock-prediction-click", detail));
    }
}

fn create() -> Box<dyn Element> {
    Box::new(StockPredictionCard)
}

fn styles() -> StyleSheet {
    let dark = palette::surface(Theme::Dark);
    let risk_colors = [
        (PredictionRisk::Critical, TokenRef::new("color-danger-500", "#ef4444")),
        (PredictionRisk::High, TokenRef::new("color-warning-600", "#d97706")),
        (PredictionRisk::Medium, TokenRef::new("color-warning-500", "#f59e0b")),
        (PredictionRisk::Low, TokenRef::new("color-success-500", "#22c55e")),
    ];

    let mut sheet = StyleSheet::new().rule(
        StyleRule::new(":host")
            .decl("display", "block")
            .decl("--risk-color", risk_colors[3].1),
    );
    for (risk, color) in risk_colors {
        sheet = sheet.rule(
            StyleRule::new(format!(":host([risk-level=\"{}\"])", risk.token()))
                .decl("--risk-color", color),
        );
    }
    sheet = sheet.rule(
        StyleRule::new(".prediction-card")
            .decl("display", "flex")
            .decl("flex-direction", "column")
            .decl("gap", palette::SPACE_MD)
            .decl("padding", palette::SPACE_LG)
            .decl("border", "1px solid")
            .decl("border-left", "4px solid var(--risk-color)")
            .decl("border-radius", palette::RADIUS_LG)
            .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
    );
    for rule in palette::surface_rules(".prediction-card") {
        sheet = sheet.rule(rule);
    }
    sheet
        .rule(StyleRule::new(":host([clickable]) .prediction-card").decl("cursor", "pointer"))
        .rule(
            StyleRule::new(":host([clickable]) .prediction-card:hover")
                .decl("transform", "translateY(-2px)")
                .decl("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.1)"),
        )
        .rule(
            StyleRule::new(".header")
                .decl("display", "flex")
                .decl("align-items", "flex-start")
                .decl("justify-content", "space-between")
                .decl("gap", palette::SPACE_SM),
        )
        .rule(
            StyleRule::new(".header-content")
                .decl("display", "flex")
                .decl("gap", palette::SPACE_SM),
        )
        .rule(StyleRule::new(".icon").decl("color", "var(--risk-color)"))
        .rule(StyleRule::new(".stock-name").decl("font-weight", "600"))
        .rule(
            StyleRule::new(".prediction-message")
                .decl("font-size", "0.875rem")
                .decl("color", "var(--risk-color)"),
        )
        .rule(
            StyleRule::new(".prediction-method, .progress-label, .interval-label")
                .decl("font-size", "0.75rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".confidence-badge")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("gap", "0.25rem")
                .decl("padding", "0.125rem 0.5rem")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("font-size", "0.75rem")
                .decl("border", format!("1px solid {}", dark.border)),
        )
        .rule(
            StyleRule::new(".progress-header, .confidence-interval")
                .decl("display", "flex")
                .decl("justify-content", "space-between"),
        )
        .rule(
            StyleRule::new(".risk-level-label")
                .decl("font-size", "0.75rem")
                .decl("font-weight", "600")
                .decl("color", "var(--risk-color)"),
        )
        .rule(
            StyleRule::new(".progress-bar-container")
                .decl("height", "0.5rem")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("background", dark.border)
                .decl("overflow", "hidden"),
        )
        .rule(
            StyleRule::new(".progress-bar")
                .decl("height", "100%")
                .decl("background", "var(--risk-color)")
                .decl("transition", "width 0.3s ease"),
        )
        .rule(
            StyleRule::new(".details")
                .decl("display", "flex")
                .decl("flex-direction", "column")
                .decl("gap", palette::SPACE_SM)
                .decl("padding-top", palette::SPACE_SM)
                .decl("border-top", format!("1px solid {}", dark.border)),
        )
        .rule(
            StyleRule::new(".detail-item")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_SM)
                .decl("font-size", "0.875rem"),
        )
        .rule(StyleRule::new(".detail-icon").decl("color", dark.muted))
        .rule(StyleRule::new(".highlight").decl("font-weight", "600"))
        .rule(
            StyleRule::new(".recommendation")
                .decl("padding", palette::SPACE_SM)
                .decl("border-radius", palette::RADIUS_MD)
                .decl("border", "1px dashed var(--risk-color)"),
        )
        .rule(
            StyleRule::new(".recommendation-title")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", "0.25rem")
                .decl("font-weight", "600"),
        )
}

/// Definition of `sh-stock-prediction-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("stock_name", ""),
            PropertyDescriptor::text("stock_id", ""),
            PropertyDescriptor::token::<PredictionRisk>("risk_level").reflect(),
            PropertyDescriptor::optional_number("days_until_rupture"),
            PropertyDescriptor::text("date_of_rupture", ""),
            PropertyDescriptor::number("confidence", 0.0),
            PropertyDescriptor::number("daily_consumption_rate", 0.0),
            PropertyDescriptor::number("current_quantity", 0.0),
            PropertyDescriptor::optional_number("days_until_rupture_pessimistic"),
            PropertyDescriptor::optional_number("days_until_rupture_optimistic"),
            PropertyDescriptor::text("recommended_reorder_date", ""),
            PropertyDescriptor::number("recommended_reorder_quantity", 0.0),
            PropertyDescriptor::boolean("show_details", true),
            PropertyDescriptor::boolean("clickable", false).reflect(),
            theme_property(),
        ])
        .event(
            "sh-stock-prediction-click",
            "{ stockId, stockName, riskLevel, daysUntilRupture }",
        )
        .default_slot()
        .styles(styles())
}
