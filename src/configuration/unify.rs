//! Additive layering of several JSON option files.
//!
//! Unlike [`deep_merge`][super::merge::deep_merge], a key defined by more than
//! one file is *accumulated*: lists of filters or highlights from a base file
//! are extended by a supplementary file instead of being replaced.

use serde_json::{Map, Number, Value};
use tracing::warn;


/// Unify option objects in order.
///
/// - new key: inserted as-is
/// - existing `true`: left unchanged
/// - arrays: concatenated (a scalar is appended)
/// - objects: unified key by key
/// - numbers: added; strings: concatenated
/// - `false` takes the incoming boolean
/// - anything else: the later value wins
pub fn unify<I>(objects: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut unified = Map::new();

    for object in objects {
        unify_into(&mut unified, object);
    }

    unified
}

fn unify_into(unified: &mut Map<String, Value>, object: Map<String, Value>) {
    for (key, incoming) in object {
        match unified.get_mut(&key) {
            Some(existing) => accumulate(&key, existing, incoming),
            None => {
                unified.insert(key, incoming);
            }
        }
    }
}

fn accumulate(key: &str, existing: &mut Value, incoming: Value) {
    if *existing == Value::Bool(true) {
        return;
    }

    match (existing, incoming) {
        (Value::Array(items), Value::Array(incoming_items)) => items.extend(incoming_items),
        (Value::Array(items), incoming) => items.push(incoming),
        (Value::Object(map), Value::Object(incoming_map)) => unify_into(map, incoming_map),
        (Value::String(text), Value::String(incoming_text)) => text.push_str(&incoming_text),
        (Value::Number(number), Value::Number(incoming_number)) => {
            *number = add_numbers(number, &incoming_number);
        }
        // `true` returned early above, so this flag is currently off.
        (Value::Bool(flag), Value::Bool(incoming_flag)) => *flag = incoming_flag,
        (existing, incoming) => {
            if !existing.is_null() {
                warn!(
                    key,
                    "Cannot accumulate {} onto {}, the later value wins.",
                    type_name(&incoming),
                    type_name(existing)
                );
            }
            *existing = incoming;
        }
    }
}

fn add_numbers(left: &Number, right: &Number) -> Number {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        if let Some(sum) = left.checked_add(right) {
            return Number::from(sum);
        }
    }

    let sum = left.as_f64().unwrap_or(0.0) + right.as_f64().unwrap_or(0.0);
    Number::from_f64(sum).unwrap_or_else(|| Number::from(0))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
