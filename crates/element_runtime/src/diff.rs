//! Positional diff between two render trees.

use crate::tree::{ElementNode, RenderNode};

/// Child-index path from a tree root.
pub type NodePath = Vec<usize>;

/// Minimal DOM operation needed to turn one render tree into the next.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a node at `path`.
    Insert {
        /// Target path.
        path: NodePath,
        /// Inserted node.
        node: RenderNode,
    },
    /// Remove the node at `path`.
    Remove {
        /// Target path.
        path: NodePath,
    },
    /// Replace the node at `path`.
    Replace {
        /// Target path.
        path: NodePath,
        /// Replacement node.
        node: RenderNode,
    },
    /// Set or change an attribute.
    SetAttribute {
        /// Target path.
        path: NodePath,
        /// Attribute name.
        name: String,
        /// New value.
        value: String,
    },
    /// Remove an attribute.
    RemoveAttribute {
        /// Target path.
        path: NodePath,
        /// Attribute name.
        name: String,
    },
    /// Change a text node.
    SetText {
        /// Target path.
        path: NodePath,
        /// New text.
        text: String,
    },
    /// Push a changed property binding to a child component.
    SetProperty {
        /// Target path.
        path: NodePath,
        /// Property name.
        name: String,
    },
}

/// Computes the mutations turning `old` into `new`. Identical trees yield none.
pub fn diff(old: &RenderNode, new: &RenderNode) -> Vec<Mutation> {
    let mut out = Vec::new();
    diff_node(old, new, &mut Vec::new(), &mut out);
    out
}

fn diff_node(old: &RenderNode, new: &RenderNode, path: &mut NodePath, out: &mut Vec<Mutation>) {
    match (old, new) {
        (RenderNode::Text(a), RenderNode::Text(b)) => {
            if a != b {
                out.push(Mutation::SetText {
                    path: path.clone(),
                    text: b.clone(),
                });
            }
        }
        (RenderNode::Element(a), RenderNode::Element(b)) if a.tag == b.tag => {
            diff_attributes(a, b, path, out);
            diff_properties(a, b, path, out);
            diff_children(&a.children, &b.children, path, out);
        }
        (RenderNode::Slot(a), RenderNode::Slot(b)) if a.name == b.name => {
            diff_children(&a.fallback, &b.fallback, path, out);
        }
        _ => out.push(Mutation::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_attributes(old: &ElementNode, new: &ElementNode, path: &NodePath, out: &mut Vec<Mutation>) {
    for (name, value) in &new.attributes {
        if old.attribute(name) != Some(value.as_str()) {
            out.push(Mutation::SetAttribute {
                path: path.clone(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    for (name, _) in &old.attributes {
        if new.attribute(name).is_none() {
            out.push(Mutation::RemoveAttribute {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }
}

fn diff_properties(old: &ElementNode, new: &ElementNode, path: &NodePath, out: &mut Vec<Mutation>) {
    for (name, value) in &new.properties {
        let previous = old.properties.iter().find(|(key, _)| key == name);
        if previous.map(|(_, v)| v) != Some(value) {
            out.push(Mutation::SetProperty {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }
}

fn diff_children(
    old: &[RenderNode],
    new: &[RenderNode],
    path: &mut NodePath,
    out: &mut Vec<Mutation>,
) {
    let shared = old.len().min(new.len());
    for index in 0..shared {
        path.push(index);
        diff_node(&old[index], &new[index], path, out);
        path.pop();
    }
    for (index, node) in new.iter().enumerate().skip(shared) {
        path.push(index);
        out.push(Mutation::Insert {
            path: path.clone(),
            node: node.clone(),
        });
        path.pop();
    }
    // Trailing removals run last-to-first so earlier indices stay valid.
    for index in (shared..old.len()).rev() {
        path.push(index);
        out.push(Mutation::Remove { path: path.clone() });
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::el;

    fn badge(variant: &str, label: &str) -> RenderNode {
        el("span")
            .class(format!("badge {variant}"))
            .child(label)
            .into()
    }

    #[test]
    fn identical_trees_produce_no_mutations() {
        assert_eq!(diff(&badge("success", "Ok"), &badge("success", "Ok")), vec![]);
    }

    #[test]
    fn attribute_and_text_changes_are_minimal() {
        assert_eq!(
            diff(&badge("success", "Ok"), &badge("danger", "Fail")),
            vec![
                Mutation::SetAttribute {
                    path: vec![],
                    name: "class".to_string(),
                    value: "badge danger".to_string(),
                },
                Mutation::SetText {
                    path: vec![0],
                    text: "Fail".to_string(),
                },
            ]
        );
    }

    #[test]
    fn children_are_inserted_removed_and_replaced_by_position() {
        let old: RenderNode = el("div").child("a").child(el("b")).child(el("i")).into();
        let new: RenderNode = el("div").child("a").child(el("em")).into();
        assert_eq!(
            diff(&old, &new),
            vec![
                Mutation::Replace {
                    path: vec![1],
                    node: el("em").into(),
                },
                Mutation::Remove { path: vec![2] },
            ]
        );

        let grown: RenderNode = el("div").child("a").child(el("em")).child("c").into();
        assert_eq!(
            diff(&new, &grown),
            vec![Mutation::Insert {
                path: vec![2],
                node: RenderNode::from("c"),
            }]
        );
    }

    #[test]
    fn removed_attributes_and_changed_bindings_are_reported() {
        let old: RenderNode = el("sh-input").attr("disabled", "").prop("value", "10").into();
        let new: RenderNode = el("sh-input").prop("value", "25").into();
        assert_eq!(
            diff(&old, &new),
            vec![
                Mutation::RemoveAttribute {
                    path: vec![],
                    name: "disabled".to_string(),
                },
                Mutation::SetProperty {
                    path: vec![],
                    name: "value".to_string(),
                },
            ]
        );
    }
}
