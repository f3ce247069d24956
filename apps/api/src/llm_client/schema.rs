// Builders for Gemini `responseSchema` declarations (OpenAPI subset, upper-case types).

use serde_json::{json, Map, Value};

pub fn string() -> Value {
    json!({ "type": "STRING" })
}

pub fn integer() -> Value {
    json!({ "type": "INTEGER" })
}

pub fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// An object schema. Property order is preserved so the declared schema reads
/// the same way the prompt lists the fields.
pub fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let mut props = Map::new();
    let mut ordering = Vec::with_capacity(properties.len());
    for (name, schema) in properties {
        ordering.push(Value::String(name.to_string()));
        props.insert(name.to_string(), schema);
    }

    json!({
        "type": "OBJECT",
        "properties": props,
        "propertyOrdering": ordering,
        "required": required,
    })
}
