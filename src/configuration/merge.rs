//! Untyped merging of raw configuration sources.
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (overlay wins)
//! - Scalars: override (overlay wins)

use serde_json::{Map, Value};


/// Deep merge two JSON values, `overlay` taking precedence at every level.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both objects: deep merge
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Arrays, scalars and mismatched shapes: overlay wins
        (_, overlay) => overlay,
    }
}

/// Merge raw sources in order (first is base, last has highest precedence).
pub fn merge_sources(sources: Vec<Value>) -> Value {
    sources
        .into_iter()
        .fold(Value::Object(Map::new()), deep_merge)
}


/// Rewrites the keys of a raw source into option paths.
///
/// Leading dashes are stripped (`--layout.flat`), kebab-case becomes
/// snake_case (`per-line`), and dotted keys are expanded into nested
/// objects (`{"layout.flat": true}` becomes `{"layout": {"flat": true}}`).
/// Non-object values are returned unchanged.
pub fn normalize_keys(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let mut normalized = Value::Object(Map::new());

    for (key, value) in map {
        let key = key.trim_start_matches('-').replace('-', "_");
        let value = normalize_keys(value);

        let nested = key
            .split('.')
            .rev()
            .fold(value, |inner, segment| {
                let mut wrapper = Map::with_capacity(1);
                wrapper.insert(segment.to_string(), inner);
                Value::Object(wrapper)
            });

        normalized = deep_merge(normalized, nested);
    }

    normalized
}
