//! `sh-footer`: copyright line with legal links.

use element_runtime::prelude::*;
use serde_json::json;

use crate::palette;
use crate::theme_property;

/// Tag of the footer element.
pub const TAG: &str = "sh-footer";

const LINKS: [(&str, &str); 4] = [
    ("mentions-legales", "Mentions Légales"),
    ("politique-confidentialite", "Politique de Confidentialité"),
    ("cgu", "CGU"),
    ("cookies", "Politique de Cookies"),
];

struct Footer;

impl Element for Footer {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let year = props.text("year");
        let copyright = format!(
            "{} - ALL RIGHTS RESERVED ©{}{year}",
            props.text("app_name"),
            if year.is_empty() { "" } else { " " },
        );

        el("footer")
            .class("footer")
            .attr("role", "contentinfo")
            .child(
                el("div")
                    .class("footer-content")
                    .child(el("div").part("copyright").class("copyright").child(copyright))
                    .child(
                        el("nav")
                            .class("links")
                            .attr("aria-label", "Liens légaux")
                            .children(LINKS.iter().map(|(link, label)| {
                                el("a")
                                    .part(link)
                                    .class("link")
                                    .attr("href", format!("#{link}"))
                                    .on(DomEvent::Click, Action::with_arg("link", *link))
                                    .child(*label)
                            })),
                    ),
            )
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &Interaction) {
        if let Some(link) = action.arg().filter(|_| action.is("link")) {
            ctx.emit(CustomEvent::new("sh-footer-link-click", json!({ "link": link })));
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(Footer)
}

fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".footer")
                .decl("padding", format!("{} {}", palette::SPACE_MD, palette::SPACE_LG))
                .decl("border-top", "1px solid"),
        );
    for rule in palette::surface_rules(".footer") {
        sheet = sheet.rule(rule);
    }
    sheet
        .rule(
            StyleRule::new(".footer-content")
                .decl("display", "flex")
                .decl("flex-wrap", "wrap")
                .decl("align-items", "center")
                .decl("justify-content", "space-between")
                .decl("gap", palette::SPACE_MD)
                .decl("font-size", "0.875rem"),
        )
        .rule(
            StyleRule::new(".links")
                .decl("display", "flex")
                .decl("flex-wrap", "wrap")
                .decl("gap", palette::SPACE_LG),
        )
        .rule(
            StyleRule::new(".link")
                .decl("color", "inherit")
                .decl("text-decoration", "none")
                .decl("transition", format!("color {} ease", palette::TRANSITION_FAST)),
        )
        .rule(StyleRule::new(".link:hover").decl("color", palette::BRAND))
}

/// Definition of `sh-footer`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("app_name", "STOCK HUB"),
            PropertyDescriptor::text("year", ""),
            theme_property(),
        ])
        .event("sh-footer-link-click", "{ link }")
        .styles(styles())
}
