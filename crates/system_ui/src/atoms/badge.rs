//! `sh-badge`: compact tone-colored label.

use element_runtime::prelude::*;

use crate::palette;
use crate::tokens::{Size, Tone};

/// Tag of the badge element.
pub const TAG: &str = "sh-badge";

struct Badge;

impl Element for Badge {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let variant = props.token::<Tone>("variant");
        let size = props.token::<Size>("size");
        let pill = if props.flag("pill") { "pill" } else { "" };

        el("span")
            .part("badge")
            .class(format!("badge {} {} {pill}", variant.token(), size.token()))
            .child(slot())
            .into()
    }
}

fn create() -> Box<dyn Element> {
    Box::new(Badge)
}

fn styles() -> StyleSheet {
    let sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "inline-flex"))
        .rule(
            StyleRule::new(".badge")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("justify-content", "center")
                .decl("font-weight", "500")
                .decl("line-height", "1")
                .decl("white-space", "nowrap")
                .decl("border-radius", palette::RADIUS_MD)
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(
            StyleRule::new(".sm")
                .decl("padding", "0.25rem 0.5rem")
                .decl("font-size", "0.75rem")
                .decl("gap", "0.25rem"),
        )
        .rule(
            StyleRule::new(".md")
                .decl("padding", "0.375rem 0.75rem")
                .decl("font-size", "0.875rem")
                .decl("gap", "0.375rem"),
        )
        .rule(
            StyleRule::new(".lg")
                .decl("padding", "0.5rem 1rem")
                .decl("font-size", "1rem")
                .decl("gap", "0.5rem"),
        )
        .rule(StyleRule::new(".pill").decl("border-radius", "9999px"));

    palette::tone_rules("", true)
        .into_iter()
        .fold(sheet, StyleSheet::rule)
}

/// Definition of `sh-badge`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<Tone>("variant"),
            PropertyDescriptor::token::<Size>("size"),
            PropertyDescriptor::boolean("pill", false),
        ])
        .default_slot()
        .styles(styles())
}
