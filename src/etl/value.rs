//! Dynamic <-> attribute value conversion. Kept in one place, per §7's
//! design note ("Keep stringification in one place with exhaustive handling
//! of variants"), rather than scattered across the rule compiler and
//! evaluator.

use crate::model::AttributeValue;
use opentelemetry::{Array, Value};
use rhai::{Dynamic, ImmutableString};

/// Converts an attribute value into the `Dynamic` a rule's condition or value
/// expression sees when it reads `attributes["..."]`.
pub fn value_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Bool(b) => Dynamic::from(*b),
        Value::I64(n) => Dynamic::from(*n),
        Value::F64(f) => Dynamic::from(*f),
        Value::String(s) => Dynamic::from(s.as_str().to_string()),
        Value::Array(Array::Bool(items)) => {
            Dynamic::from_array(items.iter().map(|b| Dynamic::from(*b)).collect())
        }
        Value::Array(Array::I64(items)) => {
            Dynamic::from_array(items.iter().map(|n| Dynamic::from(*n)).collect())
        }
        Value::Array(Array::F64(items)) => {
            Dynamic::from_array(items.iter().map(|f| Dynamic::from(*f)).collect())
        }
        Value::Array(Array::String(items)) => Dynamic::from_array(
            items
                .iter()
                .map(|s| Dynamic::from(s.as_str().to_string()))
                .collect(),
        ),
    }
}

/// Stringifies an expression's result per §7: integers/booleans/floats use
/// their canonical textual form, strings pass through, nil becomes the empty
/// string, and composites fall back to the ETL engine's own canonical form.
///
/// Scalars are funneled through [`AttributeValue::stringify`] — the single
/// `Value`-to-string conversion used everywhere else in the crate — so a
/// span attribute and a rule's computed operation name render identically
/// when they hold the same value.
pub fn stringify_dynamic(dynamic: &Dynamic) -> String {
    if dynamic.is_unit() {
        return String::new();
    }
    if let Some(b) = dynamic.clone().try_cast::<bool>() {
        return AttributeValue::from(Value::Bool(b)).stringify();
    }
    if let Some(n) = dynamic.clone().try_cast::<i64>() {
        return AttributeValue::from(Value::I64(n)).stringify();
    }
    if let Some(f) = dynamic.clone().try_cast::<f64>() {
        return AttributeValue::from(Value::F64(f)).stringify();
    }
    if let Some(s) = dynamic.clone().try_cast::<ImmutableString>() {
        return AttributeValue::from(Value::String(s.to_string().into())).stringify();
    }
    // Arrays, object maps, and anything else: defer to rhai's own rendering.
    dynamic.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_stringifies_to_empty_string() {
        assert_eq!(stringify_dynamic(&Dynamic::UNIT), "");
    }

    #[test]
    fn scalars_match_attribute_value_stringify() {
        assert_eq!(stringify_dynamic(&Dynamic::from(42_i64)), "42");
        assert_eq!(stringify_dynamic(&Dynamic::from(true)), "true");
        assert_eq!(stringify_dynamic(&Dynamic::from(1.5_f64)), "1.5");
        assert_eq!(
            stringify_dynamic(&Dynamic::from("GET /users/{id}".to_string())),
            "GET /users/{id}"
        );
    }

    #[test]
    fn empty_string_result_is_used_as_is() {
        assert_eq!(stringify_dynamic(&Dynamic::from(String::new())), "");
    }
}
