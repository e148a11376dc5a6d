//! Canonical JSON serialization helpers.
//!
//! Object keys are sorted recursively and output is compact, so the same
//! bundle always produces the same bytes and the same BLAKE3 hash.

use serde::Serialize;
use serde_json::{map::Map, Value};

/// Recursively sort JSON object keys to obtain a canonical representation.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, val) in entries {
                sorted.insert(key, canonicalize(val));
            }

            Value::Object(sorted)
        }
        Value::Array(elements) => Value::Array(elements.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serialize a value to canonical JSON (sorted keys, no whitespace)
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    value_to_canonical_json(serde_json::to_value(value)?)
}

/// Canonical JSON text of an already-parsed value
pub fn value_to_canonical_json(value: Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&canonicalize(value))
}

/// BLAKE3 hash of a canonical JSON string, hex encoded
pub fn content_hash_hex(canonical_json: &str) -> String {
    hex::encode(blake3::hash(canonical_json.as_bytes()).as_bytes())
}
