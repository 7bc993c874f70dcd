//! Binds a span's name/kind/attributes into the variables a rule's compiled
//! expression can read (§3 "Span view").

use super::value::value_to_dynamic;
use crate::model::{AttributeMap, SpanKind};
use rhai::{Map, Scope};

/// The per-span read-only context exposed to a rule's `condition`,
/// `operation_name`, and `operation_type` expressions.
pub struct TransformContext<'a> {
    pub name: &'a str,
    pub kind: SpanKind,
    pub attributes: &'a AttributeMap,
    pub resource_attributes: &'a AttributeMap,
    pub scope_attributes: &'a AttributeMap,
}

impl<'a> TransformContext<'a> {
    pub(super) fn to_scope(&self) -> Scope<'static> {
        let mut scope = Scope::new();
        scope.push("name", self.name.to_string());
        scope.push("kind", self.kind.to_string());
        scope.push("attributes", attributes_to_map(self.attributes));
        scope.push(
            "resource_attributes",
            attributes_to_map(self.resource_attributes),
        );
        scope.push("scope_attributes", attributes_to_map(self.scope_attributes));
        scope
    }
}

fn attributes_to_map(attributes: &AttributeMap) -> Map {
    let mut map = Map::new();
    for (key, value) in attributes.iter() {
        map.insert(key.as_str().into(), value_to_dynamic(&value.0));
    }
    map
}
