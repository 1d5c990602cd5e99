mod common;

use common::{drain, mount, named, nested, runtime};
use element_contract::Theme;
use element_runtime::{
    audit_conventions, el, is_scoped, ConventionViolation, ElementRegistry, ElementRuntime,
    RegistryError, RuntimeConfig, ThemeTokens, SLOTTED_ATTRIBUTE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use system_ui::atoms::input;
use system_ui::molecules::{card, metric_card, quantity_input, search_input, stat_card, stock_item_card};
use system_ui::organisms::{footer, header, page_header, stock_card, stock_prediction_card};

#[test]
fn stock_item_actions_report_the_product() {
    let mut runtime = runtime();
    let id = mount(
        &mut runtime,
        stock_item_card::TAG,
        &[
            ("name", "Peinture murale"),
            ("sku", "PNT-042"),
            ("quantity", "12"),
            ("status", "low"),
        ],
    );

    for (part, event) in [
        ("view", "sh-view-click"),
        ("edit", "sh-edit-click"),
        ("delete", "sh-delete-click"),
    ] {
        let action = nested(&runtime, id, part);
        runtime.click(action, "button").expect("click action");
        assert_eq!(
            named(&drain(&mut runtime), event),
            vec![json!({ "name": "Peinture murale", "sku": "PNT-042", "status": "low" })]
        );
    }

    let metrics = runtime.part(id, "metrics").expect("metrics");
    assert_eq!(metrics.children.len(), 1, "empty value and location are omitted");

    runtime.set_property(id, "location", "Allée B").expect("location");
    runtime.flush();
    let metrics = runtime.part(id, "metrics").expect("metrics");
    assert_eq!(metrics.children.len(), 2);
}

#[test]
fn stock_card_actions_report_name_and_level() {
    let mut runtime = runtime();
    let id = mount(
        &mut runtime,
        stock_card::TAG,
        &[
            ("name", "Acrylique Bleu Cobalt"),
            ("category", "Peinture"),
            ("status", "low"),
        ],
    );

    let details = nested(&runtime, id, "details");
    runtime.click(details, "button").expect("details");
    assert_eq!(
        named(&drain(&mut runtime), "sh-details-click"),
        vec![json!({ "name": "Acrylique Bleu Cobalt", "category": "Peinture", "status": "low" })]
    );

    for (part, event) in [
        ("session", "sh-session-click"),
        ("edit", "sh-edit-click"),
        ("delete", "sh-delete-click"),
    ] {
        let action = nested(&runtime, id, part);
        runtime.click(action, "button").expect("click action");
        assert_eq!(
            named(&drain(&mut runtime), event),
            vec![json!({ "name": "Acrylique Bleu Cobalt", "status": "low" })]
        );
    }

    runtime.set_property(id, "loading", true).expect("loading");
    runtime.flush();
    let session = nested(&runtime, id, "session");
    assert_eq!(runtime.click(session, "button"), Ok(false));
    assert!(runtime.drain_events().is_empty());
}

#[test]
fn prediction_card_reports_forecast_when_clickable() {
    let mut runtime = runtime();
    let id = mount(
        &mut runtime,
        stock_prediction_card::TAG,
        &[
            ("stock-name", "Vernis mat"),
            ("stock-id", "stk-7"),
            ("risk-level", "high"),
            ("days-until-rupture", "5"),
            ("days-until-rupture-pessimistic", "3"),
            ("days-until-rupture-optimistic", "8"),
            ("daily-consumption-rate", "2.5"),
            ("date-of-rupture", "2025-03-05"),
            ("recommended-reorder-date", "2025-03-01"),
            ("recommended-reorder-quantity", "40"),
        ],
    );

    assert_eq!(
        runtime.part(id, "message").map(|node| node.text_content()),
        Ok("🤖 IA détecte : Rupture prévue dans 5 jours".to_string())
    );
    assert_eq!(
        runtime.part(id, "progress").expect("gauge").attribute("style"),
        Some("width: 65%")
    );
    assert!(runtime.part(id, "interval").is_ok());
    let details = runtime.part(id, "details").expect("details").text_content();
    assert!(details.contains("2.50 unités/jour"));
    assert!(details.contains("5 mars 2025"));
    assert!(details.contains("40 unités"));

    runtime.click(id, "card").expect("inert click");
    assert!(runtime.drain_events().is_empty());

    runtime.set_attribute(id, "clickable", "").expect("clickable");
    runtime.flush();
    runtime.key_down(id, "card", element_contract::Key::Enter).expect("enter");
    assert_eq!(
        named(&drain(&mut runtime), "sh-stock-prediction-click"),
        vec![json!({
            "stockId": "stk-7",
            "stockName": "Vernis mat",
            "riskLevel": "high",
            "daysUntilRupture": 5.0,
        })]
    );
}

#[test]
fn prediction_card_without_forecast_hides_details() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, stock_prediction_card::TAG, &[("stock-name", "Toile")]);

    assert_eq!(
        runtime.part(id, "message").map(|node| node.text_content()),
        Ok("🤖 IA détecte : Aucun risque de rupture détecté".to_string())
    );
    assert_eq!(runtime.attribute(id, "risk-level"), Ok(Some("low")));
    assert!(runtime.part(id, "details").is_err());
    assert!(runtime.part(id, "interval").is_err());
}

#[test]
fn page_header_routes_actions_and_breadcrumbs() {
    let mut runtime = runtime();
    let id = mount(
        &mut runtime,
        page_header::TAG,
        &[
            ("title", "Stocks"),
            ("breadcrumb", r#"[{"label":"Accueil","href":"/"},{"label":"Stocks"}]"#),
            (
                "actions",
                r#"[{"label":"Exporter","handler":"export","icon":"Download"},{"label":"Ajouter","handler":"add","variant":"primary"}]"#,
            ),
        ],
    );

    let add = nested(&runtime, id, "action-1");
    runtime.click(add, "button").expect("click add");
    assert_eq!(
        named(&drain(&mut runtime), "sh-action-add"),
        vec![json!({ "action": { "label": "Ajouter", "handler": "add", "variant": "primary" } })]
    );

    runtime.click(id, "crumb-0").expect("click crumb");
    assert_eq!(
        named(&drain(&mut runtime), "sh-breadcrumb-click"),
        vec![json!({ "item": { "label": "Accueil", "href": "/" }, "index": 0 })]
    );
    assert_eq!(
        runtime.part(id, "crumb-1").expect("last crumb").attribute("aria-current"),
        Some("page")
    );
}

#[test]
fn header_swaps_session_buttons() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, header::TAG, &[("user-name", "Camille")]);
    assert_eq!(
        runtime.part(id, "welcome").map(|node| node.text_content()),
        Ok("Bienvenue, Camille".to_string())
    );

    let logout = nested(&runtime, id, "logout");
    runtime.click(logout, "button").expect("logout");
    assert_eq!(named(&drain(&mut runtime), "sh-header-logout").len(), 1);

    runtime.set_property(id, "is_logged_in", false).expect("log out");
    runtime.flush();
    let login = nested(&runtime, id, "login");
    runtime.click(login, "button").expect("login");
    assert_eq!(named(&drain(&mut runtime), "sh-header-login").len(), 1);
}

#[test]
fn footer_links_name_their_target() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, footer::TAG, &[("year", "2025")]);
    assert_eq!(
        runtime.part(id, "copyright").map(|node| node.text_content()),
        Ok("STOCK HUB - ALL RIGHTS RESERVED © 2025".to_string())
    );

    runtime.click(id, "cgu").expect("click");
    assert_eq!(
        named(&drain(&mut runtime), "sh-footer-link-click"),
        vec![json!({ "link": "cgu" })]
    );
}

#[test]
fn nested_input_events_stay_inside_the_composite() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, quantity_input::TAG, &[]);
    let field = runtime.find_descendant(id, input::TAG).expect("inner input");

    runtime.input(field, "input", "3").expect("edit");
    runtime.blur(field, "input").expect("blur");

    assert!(runtime.drain_events().is_empty());
    assert_eq!(runtime.props(id).map(|props| props.text("value")), Ok("3".to_string()));
}

#[test]
fn input_validation_marks_and_clears_errors() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, input::TAG, &[("required", ""), ("name", "email")]);

    assert_eq!(input::validate(&mut runtime, id), Ok(false));
    runtime.flush();
    assert!(runtime.part(id, "error").is_ok());

    runtime.input(id, "input", "camille@example.com").expect("type");
    assert!(runtime.part(id, "error").is_err());
    assert_eq!(input::validate(&mut runtime, id), Ok(true));

    input::clear(&mut runtime, id).expect("clear");
    runtime.flush();
    assert_eq!(runtime.props(id).map(|props| props.text("value")), Ok(String::new()));
}

#[test]
fn removing_an_element_cancels_its_timers() {
    let mut runtime = runtime();
    let search = mount(&mut runtime, search_input::TAG, &[("debounce", "300")]);
    runtime.input(search, "input", "Vernis").expect("type");
    assert_eq!(runtime.pending_timers(search), 1);

    let metric = mount(&mut runtime, metric_card::TAG, &[("animate", ""), ("value", "10")]);
    runtime.set_property(metric, "value", "500").expect("value");
    runtime.flush();
    assert!(runtime.pending_timers(metric) > 0);
    runtime.drain_events();

    runtime.remove_element(search).expect("remove search");
    runtime.remove_element(metric).expect("remove metric");
    assert_eq!(runtime.timer_count(), 0);

    runtime.advance(5_000);
    assert!(runtime.drain_events().is_empty());
}

#[test]
fn theme_switch_rerenders_in_place() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, stat_card::TAG, &[("label", "Valeur"), ("value", "3")]);
    let renders = runtime.render_count(id).expect("renders");

    runtime.set_property(id, "theme", "light").expect("theme");
    runtime.flush();

    assert!(runtime.is_connected(id));
    assert_eq!(runtime.render_count(id), Ok(renders + 1));
    assert_eq!(runtime.attribute(id, "data-theme"), Ok(Some("light")));
    assert_eq!(
        runtime.part(id, "card").expect("card").attribute("aria-label"),
        Some("Valeur: 3")
    );
}

#[test]
fn page_tokens_override_fallbacks_and_skip_malformed_values() {
    let mut runtime = runtime();
    let mut tokens = ThemeTokens::new();
    assert!(tokens.set(Theme::Dark, "--color-primary-600", "#22c55e"));
    assert!(!tokens.set(Theme::Dark, "spacing-md", "1rem; color: red"));
    runtime.set_theme_tokens(tokens);

    let css = runtime.stylesheet();
    assert!(css.starts_with("[data-theme=\"dark\"] { --color-primary-600: #22c55e; }"));
    assert!(!css.contains("color: red"));
    assert!(css.contains("var(--spacing-md, 1rem)"));
}

#[test]
fn catalogue_rules_stay_inside_their_component() {
    let registry = system_ui::catalogue().expect("catalogue");
    for definition in registry.definitions() {
        let tag = definition.tag().as_str();
        for rule in &definition.scoped_styles().rules {
            assert!(is_scoped(tag, &rule.selector), "{tag}: `{}` leaks", rule.selector);
        }
    }
}

#[test]
fn slotted_rules_reach_light_content_below_the_card_wrapper() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, card::TAG, &[]);
    runtime
        .set_light_content(
            id,
            vec![
                el("h2").attr("slot", "header").child("Stock").into(),
                el("p").child("Corps").into(),
            ],
        )
        .expect("light content");

    let composed = runtime.composed_tree(id).expect("composed");
    let host = composed.as_element().expect("host");
    assert!(host
        .children
        .iter()
        .all(|child| child.as_element().map(|node| node.tag.as_str()) != Some("h2")));
    let header = composed.find_tag("h2").expect("projected header");
    assert_eq!(header.attribute(SLOTTED_ATTRIBUTE), Some(card::TAG));
    assert_eq!(
        composed.find_tag("p").and_then(|node| node.attribute(SLOTTED_ATTRIBUTE)),
        Some(card::TAG)
    );

    let registry = system_ui::catalogue().expect("catalogue");
    let scoped = registry.get(card::TAG).expect("card").scoped_styles();
    assert!(scoped
        .rules
        .iter()
        .any(|rule| rule.selector == "sh-card [slot=\"header\"][data-slotted~=\"sh-card\"]"));
}

#[test]
fn catalogue_follows_naming_conventions_except_sync() {
    let registry = system_ui::catalogue().expect("catalogue");
    assert_eq!(
        audit_conventions(&registry, "sh"),
        vec![ConventionViolation::EventName {
            tag: quantity_input::TAG.to_string(),
            event: "sync".to_string(),
        }]
    );
}

#[test]
fn runtime_audit_uses_the_configured_prefix() {
    let config = RuntimeConfig::from_toml_str("event_prefix = \"stock\"").expect("config");
    let runtime = ElementRuntime::with_config(system_ui::catalogue().expect("catalogue"), config);
    let violations = runtime.audit();
    assert!(violations
        .iter()
        .any(|violation| matches!(violation, ConventionViolation::TagPrefix { tag } if tag == "sh-card")));
    assert_eq!(common::runtime().audit().len(), 1);
}

#[test]
fn catalogue_cannot_be_defined_twice() {
    let mut registry = ElementRegistry::new();
    system_ui::define_all(&mut registry).expect("first definition");
    let count = registry.len();

    assert!(matches!(
        system_ui::define_all(&mut registry),
        Err(RegistryError::AlreadyDefined(_))
    ));
    assert_eq!(registry.len(), count);
    assert!(registry.is_defined(system_ui::icon::TAG));
}
