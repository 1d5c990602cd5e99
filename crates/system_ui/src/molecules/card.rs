//! `sh-card`: surface container with header, body, and footer slots.

use element_runtime::prelude::*;
use serde_json::json;

use crate::palette;
use crate::theme_property;
use crate::tokens::Padding;

/// Tag of the card element.
pub const TAG: &str = "sh-card";

struct Card;

impl Element for Card {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let clickable = props.flag("clickable");
        el("div")
            .part("card")
            .class(format!(
                "card padding-{} {} {}",
                props.token::<Padding>("padding").token(),
                if props.flag("hover") { "hover" } else { "" },
                if clickable { "clickable" } else { "" },
            ))
            .attr_if("role", clickable.then_some("button"))
            .attr_if("tabindex", clickable.then_some("0"))
            .on(DomEvent::Click, "activate")
            .on(DomEvent::KeyDown, "activate")
            .child(named_slot("header"))
            .child(slot())
            .child(named_slot("footer"))
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, interaction: &Interaction) {
        if !action.is("activate") || !ctx.props().flag("clickable") {
            return;
        }
        let activated = match interaction {
            Interaction::Click => true,
            Interaction::KeyDown(key) => key.is_activation(),
            _ => false,
        };
        if activated {
            ctx.emit(CustomEvent::new("sh-card-click", json!({})));
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(Card)
}

fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".card")
                .decl("border", "1px solid")
                .decl("border-radius", palette::RADIUS_LG)
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(StyleRule::new(".padding-none").decl("padding", "0"))
        .rule(StyleRule::new(".padding-sm").decl("padding", palette::SPACE_SM))
        .rule(StyleRule::new(".padding-md").decl("padding", palette::SPACE_MD))
        .rule(StyleRule::new(".padding-lg").decl("padding", palette::SPACE_LG));
    for rule in palette::surface_rules(".card") {
        sheet = sheet.rule(rule);
    }
    sheet
        .rule(
            StyleRule::new(".hover:hover")
                .decl("box-shadow", "0 10px 15px -3px rgba(0, 0, 0, 0.1)")
                .decl("transform", "translateY(-2px)"),
        )
        .rule(StyleRule::new(".clickable").decl("cursor", "pointer"))
        .rule(StyleRule::new(".clickable:active").decl("transform", "translateY(0)"))
        .rule(
            StyleRule::new(".clickable:focus")
                .decl("outline", format!("2px solid {}", palette::FOCUS_RING))
                .decl("outline-offset", "2px"),
        )
        .rule(
            StyleRule::new("::slotted([slot=\"header\"])")
                .decl("margin-bottom", palette::SPACE_MD)
                .decl("font-weight", "600"),
        )
        .rule(
            StyleRule::new("::slotted([slot=\"footer\"])")
                .decl("margin-top", palette::SPACE_MD)
                .decl("padding-top", palette::SPACE_MD),
        )
}

/// Definition of `sh-card`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::boolean("hover", true),
            PropertyDescriptor::boolean("clickable", false),
            PropertyDescriptor::token::<Padding>("padding"),
            theme_property(),
        ])
        .event("sh-card-click", "{}")
        .slot("header")
        .default_slot()
        .slot("footer")
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use element_runtime::{ElementRegistry, ElementRuntime};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_clickable_cards_expose_button_semantics_and_emit() {
        let mut registry = ElementRegistry::new();
        registry.define(definition()).expect("define");
        let mut runtime = ElementRuntime::new(registry);
        let id = runtime.create_element(TAG).expect("create");
        runtime.flush();

        let card = runtime.part(id, "card").expect("card");
        assert_eq!(card.attribute("role"), None);
        assert_eq!(card.attribute("tabindex"), None);
        runtime.click(id, "card").expect("click");
        assert!(runtime.drain_events().is_empty());

        runtime.set_attribute(id, "clickable", "").expect("clickable");
        runtime.flush();
        let card = runtime.part(id, "card").expect("card");
        assert_eq!(card.attribute("role"), Some("button"));
        assert_eq!(card.attribute("tabindex"), Some("0"));

        runtime.key_down(id, "card", Key::Space).expect("space");
        runtime.key_down(id, "card", Key::Escape).expect("escape");
        runtime.click(id, "card").expect("click");
        let names: Vec<_> = runtime
            .drain_events()
            .into_iter()
            .map(|dispatched| dispatched.event.name.to_string())
            .collect();
        assert_eq!(names, vec!["sh-card-click", "sh-card-click"]);
    }
}
