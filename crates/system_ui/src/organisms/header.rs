//! `sh-header`: application bar with greeting, session button, and menu toggle.

use element_runtime::prelude::*;
use serde_json::json;

use crate::atoms::logo;
use crate::molecules::button;
use crate::palette;
use crate::theme_property;

/// Tag of the header element.
pub const TAG: &str = "sh-header";

struct Header;

impl Element for Header {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let logged_in = props.flag("is_logged_in");
        let menu_open = props.flag("menu_open");
        let theme = props.token::<Theme>("theme");

        let session = if logged_in {
            el(button::TAG)
                .part("logout")
                .attr("variant", "secondary")
                .attr("icon-before", "LogOut")
                .listen("sh-button-click", "logout")
                .child("Déconnexion")
        } else {
            el(button::TAG)
                .part("login")
                .attr("variant", "primary")
                .attr("icon-before", "LogIn")
                .listen("sh-button-click", "login")
                .child("Connexion")
        };

        el("header")
            .part("header")
            .child(
                el("div")
                    .class("brand")
                    .child(el(logo::TAG).attr("size", "sm"))
                    .child(
                        el("span")
                            .part("welcome")
                            .class("welcome")
                            .child(format!("Bienvenue, {}", props.text("user_name"))),
                    ),
            )
            .child(
                el("div")
                    .class("right")
                    .child(session.attr("data-theme", theme.token()))
                    .child(
                        el(button::TAG)
                            .part("menu")
                            .attr("variant", "ghost")
                            .attr("icon-before", if menu_open { "X" } else { "Menu" })
                            .bool_attr("icon-only", true)
                            .attr("aria-expanded", if menu_open { "true" } else { "false" })
                            .attr("aria-label", "Menu")
                            .listen("sh-button-click", "menu"),
                    ),
            )
            .into()
    }

    fn on_child_event(&mut self, ctx: &mut ElementContext<'_>, action: &Action, _: &CustomEvent) {
        match action.name() {
            "login" => ctx.emit(CustomEvent::new("sh-header-login", json!({}))),
            "logout" => ctx.emit(CustomEvent::new("sh-header-logout", json!({}))),
            "menu" => {
                let open = !ctx.props().flag("menu_open");
                if ctx.update("menu_open", open) {
                    ctx.emit(CustomEvent::new("sh-menu-toggle", json!({ "open": open })));
                }
            }
            _ => {}
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(Header)
}

fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new("header")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("justify-content", "space-between")
                .decl("padding", format!("0.75rem {}", palette::SPACE_LG))
                .decl("border-bottom", "3px solid #bb86fc"),
        );
    for rule in palette::surface_rules("header") {
        sheet = sheet.rule(rule);
    }
    sheet
        .rule(
            StyleRule::new(".brand")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_MD),
        )
        .rule(
            StyleRule::new(".welcome")
                .decl("font-size", "0.95rem")
                .decl("font-weight", "500"),
        )
        .rule(
            StyleRule::new(".right")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", palette::SPACE_SM),
        )
}

/// Definition of `sh-header`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::text("user_name", "Utilisateur"),
            PropertyDescriptor::boolean("is_logged_in", true),
            PropertyDescriptor::boolean("menu_open", false).reflect(),
            theme_property(),
        ])
        .event("sh-header-login", "{}")
        .event("sh-header-logout", "{}")
        .event("sh-menu-toggle", "{ open }")
        .styles(styles())
}
