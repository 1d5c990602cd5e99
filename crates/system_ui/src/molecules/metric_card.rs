//! `sh-metric-card`: KPI tile with icon, optional trend, and animated numeric value.
//!
//! With `animate` set, a numeric `value` change counts from the displayed number to the
//! new one over `duration` milliseconds on animation frames (ease-out cubic). A new value
//! mid-flight restarts from wherever the count currently is.

use element_runtime::prelude::*;
use serde_json::json;

use crate::icon;
use crate::palette;
use crate::theme_property;
use crate::tokens::{Tone, Trend};

/// Tag of the metric card element.
pub const TAG: &str = "sh-metric-card";

const SHOWN: &str = "shown";

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f64,
    to: f64,
    started: u64,
    decimals: usize,
    frame: TimerHandle,
}

#[derive(Default)]
struct MetricCard {
    animation: Option<Animation>,
}

impl MetricCard {
    fn stop(&mut self, ctx: &mut ElementContext<'_>) {
        if let Some(animation) = self.animation.take() {
            ctx.cancel(animation.frame);
        }
        ctx.update(SHOWN, PropValue::Null);
    }

    fn start(&mut self, ctx: &mut ElementContext<'_>, from: f64, target: &str) {
        let Some(to) = parse_number(target) else {
            self.stop(ctx);
            return;
        };
        if let Some(previous) = self.animation.take() {
            ctx.cancel(previous.frame);
        }
        let decimals = decimals(target);
        ctx.update(SHOWN, format_number(from, decimals));
        self.animation = Some(Animation {
            from,
            to,
            started: ctx.now(),
            decimals,
            frame: ctx.request_frame("frame"),
        });
    }
}

impl Element for MetricCard {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let label = props.text("label");
        let value = props.text("value");
        let shown = props.optional_text(SHOWN).unwrap_or_else(|| value.clone());
        let clickable = props.flag("clickable");

        let trend = match (
            props.optional_token::<Trend>("trend"),
            props.optional_text("trend_value").filter(|v| !v.is_empty()),
        ) {
            (Some(trend), Some(amount)) => {
                let (icon_name, wording) = match trend {
                    Trend::Increase => ("TrendingUp", "En hausse"),
                    Trend::Decrease => ("TrendingDown", "En baisse"),
                };
                Some(
                    el("div")
                        .part("trend")
                        .class(format!("trend {}", trend.token()))
                        .attr("role", "status")
                        .attr("aria-label", format!("{wording} de {amount}"))
                        .child(
                            el(icon::TAG)
                                .attr("name", icon_name)
                                .attr("size", "xs")
                                .attr("aria-hidden", "true"),
                        )
                        .child(el("span").child(amount)),
                )
            }
            _ => None,
        };

        el("div")
            .part("card")
            .class("metric-card")
            .attr("role", if clickable { "button" } else { "region" })
            .attr("tabindex", if clickable { "0" } else { "-1" })
            .attr(
                "aria-label",
                if clickable { format!("{label}: {value}") } else { String::new() },
            )
            .on(DomEvent::Click, "activate")
            .on(DomEvent::KeyDown, "activate")
            .child(
                el("div")
                    .class("header")
                    .child(
                        el("div").class("icon-wrapper").child(
                            el(icon::TAG)
                                .attr("name", props.text("icon"))
                                .attr("size", "lg")
                                .attr("aria-hidden", "true"),
                        ),
                    )
                    .maybe_child(trend),
            )
            .child(
                el("div")
                    .class("body")
                    .child(
                        el("div")
                            .part("value")
                            .class("value")
                            .attr("aria-live", "polite")
                            .child(slot().fallback(shown)),
                    )
                    .child(el("div").class("label").child(label)),
            )
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
            "icon": props.text("icon"),
            "label": props.text("label"),
            "value": props.text("value"),
            "variant": props.token::<Tone>("variant").token(),
        });
        ctx.emit(CustomEvent::new("sh-metric-click", detail));
    }

    fn updated(&mut self, ctx: &mut ElementContext<'_>, changes: &[PropertyChange]) {
        let Some(change) = changes.iter().find(|change| change.name == "value") else {
            return;
        };
        if !ctx.props().flag("animate") {
            if self.animation.is_some() {
                self.stop(ctx);
            }
            return;
        }
        let from = ctx
            .props()
            .optional_text(SHOWN)
            .as_deref()
            .and_then(parse_number)
            .or_else(|| change.old.as_text().and_then(parse_number))
            .unwrap_or(0.0);
        let target = ctx.props().text("value");
        self.start(ctx, from, &target);
    }

    fn on_timer(&mut self, ctx: &mut ElementContext<'_>, action: &Action) {
        let Some(animation) = self.animation.filter(|_| action.is("frame")) else {
            return;
        };
        let duration = ctx.props().number("duration").unwrap_or(0.0);
        let elapsed = ctx.now().saturating_sub(animation.started) as f64;
        let progress = if duration > 0.0 {
            (elapsed / duration).min(1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.animation = None;
            ctx.update(SHOWN, PropValue::Null);
            return;
        }

        let eased = 1.0 - (1.0 - progress).powi(3);
        let current = animation.from + (animation.to - animation.from) * eased;
        ctx.update(SHOWN, format_number(current, animation.decimals));
        self.animation = Some(Animation {
            frame: ctx.request_frame("frame"),
            ..animation
        });
    }

    fn disconnected(&mut self) {
        self.animation = None;
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn decimals(raw: &str) -> usize {
    raw.trim()
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn create() -> Box<dyn Element> {
    Box::<MetricCard>::default()
}

fn styles() -> StyleSheet {
    let light = palette::surface(Theme::Light);
    let dark = palette::surface(Theme::Dark);
    let mut sheet = StyleSheet::new()
        .rule(
            StyleRule::new(":host")
                .decl("display", "block")
                .decl("--metric-accent", palette::BRAND),
        )
        .rule(
            StyleRule::new(".metric-card")
                .decl("display", "flex")
                .decl("flex-direction", "column")
                .decl("gap", palette::SPACE_MD)
                .decl("padding", palette::SPACE_LG)
                .decl("background", dark.background)
                .decl("border", format!("1px solid {}", dark.border))
                .decl("border-radius", palette::RADIUS_LG)
                .decl("color", dark.text)
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(
            StyleRule::new(":host([data-theme=\"light\"]) .metric-card")
                .decl("background", light.background)
                .decl("border-color", light.border)
                .decl("color", light.text),
        )
        .rule(StyleRule::new(":host([clickable]) .metric-card").decl("cursor", "pointer"))
        .rule(
            StyleRule::new(":host([clickable]) .metric-card:hover")
                .decl("transform", "translateY(-2px)")
                .decl("border-color", "var(--metric-accent)"),
        )
        .rule(
            StyleRule::new(".header")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("justify-content", "space-between"),
        )
        .rule(
            StyleRule::new(".icon-wrapper")
                .decl("display", "flex")
                .decl("padding", "0.75rem")
                .decl("border-radius", palette::RADIUS_LG)
                .decl("background", "rgba(139, 92, 246, 0.1)")
                .decl("color", "var(--metric-accent)"),
        )
        .rule(
            StyleRule::new(".trend")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("gap", "0.25rem")
                .decl("padding", "0.25rem 0.5rem")
                .decl("border-radius", "9999px")
                .decl("font-size", "0.75rem")
                .decl("font-weight", "600"),
        )
        .rule(
            StyleRule::new(".trend.increase")
                .decl("background", palette::tone_colors(Tone::Success, Theme::Dark).background)
                .decl("color", palette::tone_colors(Tone::Success, Theme::Dark).foreground),
        )
        .rule(
            StyleRule::new(".trend.decrease")
                .decl("background", palette::tone_colors(Tone::Danger, Theme::Dark).background)
                .decl("color", palette::tone_colors(Tone::Danger, Theme::Dark).foreground),
        )
        .rule(
            StyleRule::new(".value")
                .decl("font-size", "1.875rem")
                .decl("font-weight", "700")
                .decl("line-height", "1.2"),
        )
        .rule(
            StyleRule::new(".label")
                .decl("font-size", "0.875rem")
                .decl("color", dark.muted),
        )
        .rule(
            StyleRule::new(".metric-card:focus-visible")
                .decl("outline", format!("2px solid {}", palette::FOCUS_RING))
                .decl("outline-offset", "2px"),
        );
    for tone in [Tone::Success, Tone::Warning, Tone::Danger, Tone::Info] {
        sheet = sheet.rule(
            StyleRule::new(format!(":host([variant=\"{}\"])", tone.token()))
                .decl("--metric-accent", palette::tone_colors(tone, Theme::Dark).foreground),
        );
    }
    sheet
}

/// Definition of `sh-metric-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("icon", "TrendingUp"),
            PropertyDescriptor::text("label", ""),
            PropertyDescriptor::text("value", "0"),
            PropertyDescriptor::token::<Tone>("variant").reflect(),
            PropertyDescriptor::optional_token::<Trend>("trend"),
            PropertyDescriptor::optional_text("trend_value"),
            PropertyDescriptor::boolean("clickable", false).reflect(),
            PropertyDescriptor::boolean("animate", false),
            PropertyDescriptor::number("duration", 1000.0),
            PropertyDescriptor::state(SHOWN, PropKind::Text, PropValue::Null),
            theme_property(),
        ])
        .event("sh-metric-click", "{ icon, label, value, variant }")
        .default_slot()
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use element_runtime::{ElementRegistry, ElementRuntime, InstanceId};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted() -> (ElementRuntime, InstanceId) {
        let mut registry = ElementRegistry::new();
        registry.define(icon::definition()).expect("define icon");
        registry.define(definition()).expect("define card");
        let mut runtime = ElementRuntime::new(registry);
        let id = runtime.create_element(TAG).expect("create");
        runtime.flush();
        (runtime, id)
    }

    fn shown(runtime: &ElementRuntime, id: InstanceId) -> String {
        runtime
            .part(id, "value")
            .map(|node| node.text_content())
            .unwrap_or_default()
    }

    #[test]
    fn trend_region_needs_both_direction_and_amount() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "trend", "increase").expect("trend");
        runtime.flush();
        assert!(runtime.part(id, "trend").is_err());

        runtime.set_attribute(id, "trend-value", "+12%").expect("amount");
        runtime.flush();
        let trend = runtime.part(id, "trend").expect("trend");
        assert_eq!(trend.attribute("aria-label"), Some("En hausse de +12%"));
    }

    #[test]
    fn animated_values_count_up_on_frames_and_settle() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "animate", "").expect("animate");
        runtime.set_attribute(id, "duration", "100").expect("duration");
        runtime.set_attribute(id, "value", "200").expect("value");
        runtime.flush();

        assert_eq!(shown(&runtime, id), "0");
        assert_eq!(runtime.pending_timers(id), 1);

        runtime.advance(48);
        let midway: f64 = shown(&runtime, id).parse().expect("numeric");
        assert!(midway > 0.0 && midway < 200.0);

        runtime.advance(100);
        assert_eq!(shown(&runtime, id), "200");
        assert_eq!(runtime.pending_timers(id), 0);
    }

    #[test]
    fn non_numeric_values_render_immediately() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "animate", "").expect("animate");
        runtime.set_attribute(id, "value", "1,2 k€").expect("value");
        runtime.flush();
        assert_eq!(shown(&runtime, id), "1,2 k€");
        assert_eq!(runtime.pending_timers(id), 0);
    }

    #[test]
    fn click_reports_the_metric_only_when_clickable() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "label", "Produits").expect("label");
        runtime.click(id, "card").expect("click");
        assert!(runtime.drain_events().is_empty());

        runtime.set_attribute(id, "clickable", "").expect("clickable");
        runtime.flush();
        assert_eq!(runtime.attribute(id, "clickable"), Ok(Some("")));
        runtime.key_down(id, "card", Key::Enter).expect("enter");
        let events = runtime.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event.detail,
            json!({ "icon": "TrendingUp", "label": "Produits", "value": "0", "variant": "default" })
        );
    }
}
