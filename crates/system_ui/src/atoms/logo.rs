//! `sh-logo`: brand mark with word mark.

use element_runtime::prelude::*;

use crate::tokens::Size;

/// Tag of the logo element.
pub const TAG: &str = "sh-logo";

struct Logo;

impl Element for Logo {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let size = props.token::<Size>("size");
        el("div")
            .part("logo")
            .class(format!("logo-container {}", size.token()))
            .child(
                el("div")
                    .class("icon")
                    .attr("role", "img")
                    .attr("aria-label", "Logo StockHub")
                    .child(el("span").child("SH")),
            )
            .child(el("h1").class("text").child("StockHub"))
            .into()
    }
}

fn create() -> Box<dyn Element> {
    Box::new(Logo)
}

fn styles() -> StyleSheet {
    let icon_size = TokenRef::new("logo-icon-size", "2.5rem");
    StyleSheet::new()
        .rule(
            StyleRule::new(":host")
                .decl("display", "inline-flex")
                .decl("align-items", "center"),
        )
        .rule(
            StyleRule::new(".logo-container")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", TokenRef::new("logo-gap", "0.75rem")),
        )
        .rule(
            StyleRule::new(".icon")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("justify-content", "center")
                .decl("width", icon_size)
                .decl("height", icon_size)
                .decl("border-radius", "0.75rem")
                .decl("background", "linear-gradient(to bottom right, #8b5cf6, #7c3aed)")
                .decl("color", "white")
                .decl("font-weight", "bold")
                .decl("flex-shrink", "0"),
        )
        .rule(
            StyleRule::new(".sm .icon")
                .decl("width", "2rem")
                .decl("height", "2rem")
                .decl("font-size", "0.875rem"),
        )
        .rule(
            StyleRule::new(".lg .icon")
                .decl("width", "3rem")
                .decl("height", "3rem")
                .decl("font-size", "1.125rem"),
        )
        .rule(
            StyleRule::new(".text")
                .decl("margin", "0")
                .decl("font-weight", "bold")
                .decl("background", "linear-gradient(to right, #8b5cf6, #7c3aed)")
                .decl("background-clip", "text")
                .decl("-webkit-text-fill-color", "transparent"),
        )
}

/// Definition of `sh-logo`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![PropertyDescriptor::token::<Size>("size")])
        .styles(styles())
}
