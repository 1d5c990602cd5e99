//! `sh-text`: themed heading or paragraph.

use element_runtime::prelude::*;
use leptos::logging;

use crate::palette;
use crate::theme_property;
use crate::tokens::{HeadingLevel, TextKind};

/// Tag of the text element.
pub const TAG: &str = "sh-text";

struct Text;

impl Element for Text {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let tag = match props.token::<TextKind>("kind") {
            TextKind::Title => props.token::<HeadingLevel>("tag").token(),
            TextKind::Paragraph => "p",
        };
        el(tag)
            .part("text")
            .attr_if("style", custom_color(&props.text("color")))
            .child(props.text("content"))
            .into()
    }
}

/// Inline color override, or `None` when the text inherits its color.
fn custom_color(color: &str) -> Option<String> {
    let color = color.trim();
    if color.is_empty() || color == "inherit" {
        return None;
    }
    if color.contains([';', '{', '}', '<', '>', '"']) {
        logging::warn!("ignoring malformed sh-text color `{color}`");
        return None;
    }
    Some(format!("color: {color}"))
}

fn create() -> Box<dyn Element> {
    Box::new(Text)
}

fn styles() -> StyleSheet {
    let sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new("h1, h2, h3, h4, h5, h6")
                .decl("margin", "0")
                .decl("font-weight", "700")
                .decl("line-height", "1.2"),
        )
        .rule(StyleRule::new("h1").decl("font-size", "2.25rem"))
        .rule(StyleRule::new("h2").decl("font-size", "1.875rem"))
        .rule(StyleRule::new("h3").decl("font-size", "1.5rem"))
        .rule(
            StyleRule::new("p")
                .decl("margin", "0")
                .decl("line-height", "1.6"),
        );

    [Theme::Dark, Theme::Light]
        .into_iter()
        .fold(sheet, |sheet, theme| {
            sheet.rule(
                StyleRule::new(format!("{} :is(h1, h2, h3, h4, h5, h6, p)", palette::theme_host(theme)))
                    .decl("color", palette::surface(theme).text),
            )
        })
}

/// Definition of `sh-text`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<TextKind>("kind").attribute("type"),
            PropertyDescriptor::text("content", ""),
            PropertyDescriptor::token::<HeadingLevel>("tag"),
            PropertyDescriptor::text("color", "inherit"),
            theme_property(),
        ])
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_explicit_well_formed_colors_are_inlined() {
        assert_eq!(custom_color("inherit"), None);
        assert_eq!(custom_color(" "), None);
        assert_eq!(custom_color("#7c3aed"), Some("color: #7c3aed".to_string()));
        assert_eq!(custom_color("red; background: url(x)"), None);
    }
}
