mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{drain, mount, named, runtime};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use system_ui::atoms::{badge, input};
use system_ui::molecules::{card, quantity_input, search_input, stat_card};

#[test]
fn success_badge_renders_medium_rounded_label() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, badge::TAG, &[("variant", "success"), ("size", "md")]);

    let node = runtime.part(id, "badge").expect("badge");
    assert_eq!(node.tag, "span");
    assert!(node.has_class("badge"));
    assert!(node.has_class("success"));
    assert!(node.has_class("md"));
    assert!(!node.has_class("pill"));

    let css = runtime.stylesheet();
    assert!(css.contains("padding: 0.375rem 0.75rem"));
    assert!(css.contains("border-radius: var(--border-radius-md, 0.375rem)"));
}

#[test]
fn quantity_input_syncs_edited_value_once() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, quantity_input::TAG, &[("value", "10")]);
    let synced = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&synced);
    runtime
        .add_event_listener(id, "sync", move |event| sink.borrow_mut().push(event.detail.clone()))
        .expect("listen");

    assert!(runtime.part(id, "sync").expect("sync").attribute("disabled").is_some());
    let field = runtime.find_descendant(id, input::TAG).expect("inner input");
    assert_eq!(runtime.props(field).map(|props| props.text("value")), Ok("10".to_string()));

    runtime.input(field, "input", "25").expect("edit");
    assert_eq!(runtime.props(id).map(|props| props.flag("dirty")), Ok(true));
    assert!(runtime.part(id, "sync").expect("sync").attribute("disabled").is_none());

    assert_eq!(runtime.click(id, "sync"), Ok(true));
    assert_eq!(*synced.borrow(), vec![Value::String("25".to_string())]);
    assert_eq!(runtime.props(id).map(|props| props.flag("dirty")), Ok(false));
    assert!(runtime.part(id, "sync").expect("sync").attribute("disabled").is_some());

    assert_eq!(runtime.click(id, "sync"), Ok(false));
    assert_eq!(synced.borrow().len(), 1);
    assert!(named(&drain(&mut runtime), "sync").is_empty());
}

#[test]
fn typing_a_word_debounces_into_one_search() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, search_input::TAG, &[("debounce", "300")]);

    let word = "Paint";
    for end in 1..=word.len() {
        runtime.input(id, "input", &word[..end]).expect("keystroke");
        runtime.advance(80);
    }
    let events = drain(&mut runtime);
    assert_eq!(named(&events, "sh-search-change").len(), 5);
    assert_eq!(named(&events, "sh-search-change")[4], json!({ "value": "Paint" }));
    assert!(named(&events, "sh-search").is_empty());

    runtime.advance(300);
    assert_eq!(named(&drain(&mut runtime), "sh-search"), vec![json!({ "value": "Paint" })]);
}

#[test]
fn non_clickable_card_is_inert() {
    let mut runtime = runtime();
    let id = mount(&mut runtime, card::TAG, &[("padding", "lg")]);

    let node = runtime.part(id, "card").expect("card");
    assert_eq!(node.attribute("role"), None);
    assert_eq!(node.attribute("tabindex"), None);

    runtime.click(id, "card").expect("click");
    runtime
        .key_down(id, "card", element_contract::Key::Enter)
        .expect("enter");
    assert!(named(&drain(&mut runtime), "sh-card-click").is_empty());
}

#[test]
fn stat_card_click_selects_and_reports() {
    let mut runtime = runtime();
    let id = mount(
        &mut runtime,
        stat_card::TAG,
        &[("label", "Stock faible"), ("value", "7"), ("risk-level", "medium")],
    );
    assert_eq!(
        runtime.part(id, "card").expect("card").attribute("aria-pressed"),
        Some("false")
    );

    runtime.click(id, "card").expect("click");

    assert_eq!(
        runtime.part(id, "card").expect("card").attribute("aria-pressed"),
        Some("true")
    );
    assert_eq!(runtime.attribute(id, "selected"), Ok(Some("")));
    assert_eq!(
        named(&drain(&mut runtime), "sh-stat-click"),
        vec![json!({
            "label": "Stock faible",
            "value": "7",
            "riskLevel": "medium",
            "selected": true,
        })]
    );
}
