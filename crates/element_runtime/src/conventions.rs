//! Static naming audit over registered definitions.
//!
//! Naming rules are a build-time contract. Nothing on the emit path consults them.

use element_contract::is_kebab_case;

use crate::registry::ElementRegistry;

/// One naming rule broken by a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConventionViolation {
    /// The tag does not start with the library prefix.
    TagPrefix {
        /// Offending tag.
        tag: String,
    },
    /// A declared event is not `prefix-noun-verb` kebab-case.
    EventName {
        /// Emitting tag.
        tag: String,
        /// Offending event.
        event: String,
    },
    /// A named slot is not kebab-case.
    SlotName {
        /// Declaring tag.
        tag: String,
        /// Offending slot.
        slot: String,
    },
    /// A property's attribute is not the lowercase hyphenated form.
    AttributeName {
        /// Declaring tag.
        tag: String,
        /// Offending attribute.
        attribute: String,
    },
}

/// Checks every definition against the naming rules for `prefix`.
pub fn audit_conventions(registry: &ElementRegistry, prefix: &str) -> Vec<ConventionViolation> {
    let mut violations = Vec::new();
    for definition in registry.definitions() {
        let tag = definition.tag().as_str();
        if definition.tag().prefix() != prefix {
            violations.push(ConventionViolation::TagPrefix {
                tag: tag.to_string(),
            });
        }

        for event in definition.events() {
            if !event.name.is_conventional(prefix) {
                violations.push(ConventionViolation::EventName {
                    tag: tag.to_string(),
                    event: event.name.to_string(),
                });
            }
        }

        for slot in definition.slots().iter().flatten() {
            if !is_kebab_case(slot) {
                violations.push(ConventionViolation::SlotName {
                    tag: tag.to_string(),
                    slot: slot.to_string(),
                });
            }
        }

        for descriptor in definition.property_table() {
            let Some(attribute) = descriptor.attribute_name() else {
                continue;
            };
            if !is_kebab_case(&attribute) {
                violations.push(ConventionViolation::AttributeName {
                    tag: tag.to_string(),
                    attribute,
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use element_contract::{PropertyDescriptor, TagName};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::element::Element;
    use crate::registry::ElementDefinition;
    use crate::store::PropertyStore;
    use crate::tree::{el, RenderNode};

    struct Blank;

    impl Element for Blank {
        fn render(&self, _props: &PropertyStore) -> RenderNode {
            el("div").into()
        }
    }

    fn blank() -> Box<dyn Element> {
        Box::new(Blank)
    }

    #[test]
    fn audit_reports_each_broken_rule() {
        let mut registry = ElementRegistry::new();
        registry
            .define(
                ElementDefinition::new(TagName::trusted("sh-good"), blank)
                    .properties(vec![PropertyDescriptor::boolean("show_details", false)])
                    .event("sh-good-click", "{}")
                    .slot("header")
                    .default_slot(),
            )
            .expect("define good");
        registry
            .define(
                ElementDefinition::new(TagName::trusted("x-bad"), blank)
                    .properties(vec![PropertyDescriptor::text("label", "").attribute("Label")])
                    .event("sync", "string")
                    .slot("Header"),
            )
            .expect("define bad");

        assert_eq!(
            audit_conventions(&registry, "sh"),
            vec![
                ConventionViolation::TagPrefix {
                    tag: "x-bad".to_string(),
                },
                ConventionViolation::EventName {
                    tag: "x-bad".to_string(),
                    event: "sync".to_string(),
                },
                ConventionViolation::SlotName {
                    tag: "x-bad".to_string(),
                    slot: "Header".to_string(),
                },
                ConventionViolation::AttributeName {
                    tag: "x-bad".to_string(),
                    attribute: "Label".to_string(),
                },
            ]
        );
    }
}
