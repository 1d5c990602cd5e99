//! `sh-input`: text field with sizes, validation, and an inline error message.
//!
//! Change, focus, and blur events bubble inside the owning scope but do not cross its
//! shadow boundary; composite components listen for them on the host node.

use element_runtime::prelude::*;
use element_runtime::{ElementRuntime, InstanceId, RuntimeError};
use serde_json::json;

use crate::palette;
use crate::tokens::{FieldSize, InputType};

/// Tag of the input element.
pub const TAG: &str = "sh-input";

const REQUIRED_MESSAGE: &str = "Ce champ est requis";
const INVALID_EMAIL_MESSAGE: &str = "Adresse email invalide";
const ERROR_GLYPH: &str = "M18 10a8 8 0 11-16 0 8 8 0 0116 0zm-7 4a1 1 0 11-2 0 1 1 0 012 0zm-1-9a1 1 0 00-1 1v4a1 1 0 102 0V6a1 1 0 00-1-1z";

struct InputField;

impl Element for InputField {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let name = props.text("name");
        let input_id = if name.is_empty() {
            "sh-input-field".to_string()
        } else {
            format!("sh-input-{name}")
        };
        let error_id = format!("{input_id}-error");
        let error = props.flag("error");

        let input = el("input")
            .part("input")
            .attr("id", input_id)
            .class(format!(
                "{} {} {}",
                props.token::<FieldSize>("size").token(),
                if error { "error" } else { "" },
                if props.flag("hide_arrows") { "hide-arrows" } else { "" },
            ))
            .attr("type", props.token::<InputType>("input_type").token())
            .attr("value", props.text("value"))
            .attr("placeholder", props.text("placeholder"))
            .bool_attr("disabled", props.flag("disabled"))
            .bool_attr("required", props.flag("required"))
            .attr("name", name)
            .attr("aria-invalid", if error { "true" } else { "false" })
            .attr_if("aria-describedby", error.then(|| error_id.clone()))
            .on(DomEvent::Input, "input")
            .on(DomEvent::Blur, "blur")
            .on(DomEvent::Focus, "focus");

        let message = error.then(|| {
            el("div")
                .part("error")
                .class("error-message")
                .attr("id", error_id)
                .child(
                    el("svg")
                        .class("error-icon")
                        .attr("fill", "currentColor")
                        .attr("viewBox", "0 0 20 20")
                        .child(
                            el("path")
                                .attr("fill-rule", "evenodd")
                                .attr("clip-rule", "evenodd")
                                .attr("d", ERROR_GLYPH),
                        ),
                )
                .child(props.text("error_message"))
        });

        el("div")
            .class("input-wrapper")
            .child(input)
            .maybe_child(message)
            .into()
    }

    fn handle(&mut self, ctx: &mut ElementContext<'_>, action: &Action, interaction: &Interaction) {
        let name = ctx.props().text("name");
        match action.name() {
            "input" => {
                let value = interaction.input_value().unwrap_or_default().to_string();
                if !ctx.update("value", value.as_str()) {
                    return;
                }
                if ctx.props().flag("error") && !value.trim().is_empty() {
                    ctx.update("error", false);
                }
                let kind = ctx.props().token::<InputType>("input_type");
                ctx.emit(
                    CustomEvent::new(
                        "sh-input-change",
                        json!({ "value": value, "name": name, "type": kind.token() }),
                    )
                    .uncomposed(),
                );
            }
            "blur" | "focus" => {
                let event = if action.is("blur") {
                    "sh-input-blur"
                } else {
                    "sh-input-focus"
                };
                let value = ctx.props().text("value");
                ctx.emit(
                    CustomEvent::new(event, json!({ "value": value, "name": name })).uncomposed(),
                );
            }
            _ => {}
        }
    }
}

fn create() -> Box<dyn Element> {
    Box::new(InputField)
}

/// Validates the field the way a form submit would, updating its error state.
///
/// A required field must not be blank and an email field must hold an address.
pub fn validate(runtime: &mut ElementRuntime, id: InstanceId) -> Result<bool, RuntimeError> {
    let props = runtime.props(id)?;
    let value = props.text("value");
    let failure = if props.flag("required") && value.trim().is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if props.token::<InputType>("input_type") == InputType::Email
        && !value.is_empty()
        && !is_valid_email(&value)
    {
        Some(INVALID_EMAIL_MESSAGE)
    } else {
        None
    };

    match failure {
        Some(message) => {
            runtime.set_property(id, "error", true)?;
            runtime.set_property(id, "error_message", message)?;
            Ok(false)
        }
        None => {
            runtime.set_property(id, "error", false)?;
            Ok(true)
        }
    }
}

/// Empties the field and clears its error state.
pub fn clear(runtime: &mut ElementRuntime, id: InstanceId) -> Result<(), RuntimeError> {
    runtime.set_property(id, "value", "")?;
    runtime.set_property(id, "error", false)?;
    Ok(())
}

fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    let clean = |part: &str| {
        !part.is_empty() && !part.contains('@') && !part.chars().any(char::is_whitespace)
    };
    let dotted = domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len());
    clean(local) && clean(domain) && dotted
}

fn styles() -> StyleSheet {
    let danger = TokenRef::new("color-danger-500", "#ef4444");
    StyleSheet::new()
        .rule(StyleRule::new(":host").decl("display", "block"))
        .rule(
            StyleRule::new(".input-wrapper")
                .decl("position", "relative")
                .decl("width", "100%"),
        )
        .rule(
            StyleRule::new("input")
                .decl("width", "100%")
                .decl("border", format!("1px solid {}", palette::surface(Theme::Light).border))
                .decl("border-radius", palette::RADIUS_MD)
                .decl("outline", "none")
                .decl("transition", format!("all {} ease", palette::TRANSITION_FAST)),
        )
        .rule(
            StyleRule::new("input.small")
                .decl("width", "25%")
                .decl("padding", "0.25rem 0.5rem")
                .decl("font-size", "0.75rem"),
        )
        .rule(
            StyleRule::new("input.medium")
                .decl("width", "50%")
                .decl("padding", format!("{} 0.75rem", palette::SPACE_SM)),
        )
        .rule(
            StyleRule::new("input.large")
                .decl("width", "100%")
                .decl("padding", format!("0.75rem {}", palette::SPACE_LG))
                .decl("font-size", "1.25rem"),
        )
        .rule(StyleRule::new("input:focus").decl("border-color", palette::FOCUS_RING))
        .rule(
            StyleRule::new("input:disabled")
                .decl("opacity", "0.5")
                .decl("cursor", "not-allowed"),
        )
        .rule(
            StyleRule::new("input.error")
                .decl("border-color", danger)
                .decl("background-color", "rgba(239, 68, 68, 0.05)"),
        )
        .rule(
            StyleRule::new("input.hide-arrows")
                .decl("appearance", "textfield")
                .decl("-moz-appearance", "textfield"),
        )
        .rule(
            StyleRule::new(".error-message")
                .decl("display", "flex")
                .decl("align-items", "center")
                .decl("gap", "0.25rem")
                .decl("margin-top", "0.25rem")
                .decl("font-size", "0.75rem")
                .decl("color", danger),
        )
        .rule(
            StyleRule::new(".error-icon")
                .decl("width", "1rem")
                .decl("height", "1rem"),
        )
}

/// Definition of `sh-input`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<InputType>("input_type").attribute("type"),
            PropertyDescriptor::text("placeholder", ""),
            PropertyDescriptor::text("value", ""),
            PropertyDescriptor::boolean("error", false),
            PropertyDescriptor::text("error_message", REQUIRED_MESSAGE),
            PropertyDescriptor::token::<FieldSize>("size"),
            PropertyDescriptor::boolean("hide_arrows", false),
            PropertyDescriptor::boolean("disabled", false),
            PropertyDescriptor::text("name", ""),
            PropertyDescriptor::boolean("required", false),
        ])
        .event("sh-input-change", "{ value, name, type }")
        .event("sh-input-blur", "{ value, name }")
        .event("sh-input-focus", "{ value, name }")
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use element_runtime::ElementRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted() -> (ElementRuntime, InstanceId) {
        let mut registry = ElementRegistry::new();
        registry.define(definition()).expect("define input");
        let mut runtime = ElementRuntime::new(registry);
        let id = runtime.create_element(TAG).expect("create");
        runtime.flush();
        (runtime, id)
    }

    #[test]
    fn typing_updates_the_value_clears_errors_and_emits_change() {
        let (mut runtime, id) = mounted();
        runtime.set_property(id, "error", true).expect("error");
        runtime.set_attribute(id, "name", "email").expect("name");
        runtime.flush();
        assert!(runtime.part(id, "error").is_ok());

        runtime.input(id, "input", "a").expect("input");

        assert_eq!(runtime.property(id, "value"), Ok(PropValue::from("a")));
        assert_eq!(runtime.property(id, "error"), Ok(PropValue::Bool(false)));
        assert!(runtime.part(id, "error").is_err());
        let events = runtime.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.name, "sh-input-change");
        assert_eq!(
            events[0].event.detail,
            json!({ "value": "a", "name": "email", "type": "text" })
        );
        assert!(events[0].event.bubbles);
        assert!(!events[0].event.composed);
    }

    #[test]
    fn disabled_fields_ignore_input() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "disabled", "").expect("disabled");
        runtime.flush();

        assert_eq!(runtime.input(id, "input", "x"), Ok(false));
        assert_eq!(runtime.focus(id, "input"), Ok(false));
        assert!(runtime.drain_events().is_empty());
    }

    #[test]
    fn validation_checks_required_and_email_rules() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "required", "").expect("required");
        assert_eq!(validate(&mut runtime, id), Ok(false));
        assert_eq!(
            runtime.property(id, "error_message"),
            Ok(PropValue::from(REQUIRED_MESSAGE))
        );

        runtime.set_attribute(id, "type", "email").expect("type");
        runtime.set_property(id, "value", "nobody@").expect("value");
        assert_eq!(validate(&mut runtime, id), Ok(false));
        assert_eq!(
            runtime.property(id, "error_message"),
            Ok(PropValue::from(INVALID_EMAIL_MESSAGE))
        );

        runtime.set_property(id, "value", "a@b.io").expect("value");
        assert_eq!(validate(&mut runtime, id), Ok(true));
        runtime.flush();
        assert!(runtime.part(id, "error").is_err());

        clear(&mut runtime, id).expect("clear");
        assert_eq!(runtime.property(id, "value"), Ok(PropValue::from("")));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("stock@hub.fr"));
        assert!(!is_valid_email("stock@hub"));
        assert!(!is_valid_email("stock@.fr"));
        assert!(!is_valid_email("st ock@hub.fr"));
        assert!(!is_valid_email("a@b@c.fr"));
    }
}
