#![allow(dead_code)]

use element_runtime::{ElementRuntime, InstanceId, PART_ATTRIBUTE};
use serde_json::Value;

/// Runtime with the whole catalogue defined.
pub fn runtime() -> ElementRuntime {
    ElementRuntime::new(system_ui::catalogue().expect("define catalogue"))
}

/// Creates `tag` with `attributes` and renders it.
pub fn mount(runtime: &mut ElementRuntime, tag: &str, attributes: &[(&str, &str)]) -> InstanceId {
    let id = runtime.create_element(tag).expect("create element");
    for (name, value) in attributes {
        runtime.set_attribute(id, name, value).expect("set attribute");
    }
    runtime.flush();
    id
}

/// Nested component instance rendered at `part` of `parent`.
pub fn nested(runtime: &ElementRuntime, parent: InstanceId, part: &str) -> InstanceId {
    runtime
        .children(parent)
        .expect("children")
        .into_iter()
        .find(|child| runtime.attribute(*child, PART_ATTRIBUTE) == Ok(Some(part)))
        .unwrap_or_else(|| panic!("no nested component at part `{part}`"))
}

/// Names and details of the events that reached the document.
pub fn drain(runtime: &mut ElementRuntime) -> Vec<(String, Value)> {
    runtime
        .drain_events()
        .into_iter()
        .map(|dispatched| (dispatched.event.name.to_string(), dispatched.event.detail))
        .collect()
}

/// Details of the drained events named `name`.
pub fn named(events: &[(String, Value)], name: &str) -> Vec<Value> {
    events
        .iter()
        .filter(|(event, _)| event == name)
        .map(|(_, detail)| detail.clone())
        .collect()
}
