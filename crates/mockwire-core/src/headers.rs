//! Header normalization.
//!
//! Headers may be written as a newline separated `"Name: Value"` block, as an
//! array of `{"key": ..., "value": ...}` objects, or as an object mapping names
//! to values. All three converge to the object form before structural decode.
//! Malformed entries are dropped, never rejected.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::trace;

/// Canonical header mapping, ordered by first insertion.
pub type Headers = IndexMap<String, String>;

/// Tree key holding the headers of a request or response.
pub const HEADERS_KEY: &str = "headers";

/// Rewrite the `headers` entry of a document object into its canonical form.
///
/// An absent entry leaves the object untouched.
pub fn prepare_headers(mut object: Map<String, Value>) -> Map<String, Value> {
    if let Some(slot) = object.get_mut(HEADERS_KEY) {
        *slot = normalize_headers(slot.take());
    }
    object
}

/// Normalize a raw headers value into an object value.
///
/// Scalars are read as a header block, arrays as pairs, and objects have their
/// scalar values turned into strings. Null is returned as is.
pub fn normalize_headers(raw: Value) -> Value {
    match raw {
        Value::String(block) => headers_to_value(parse_header_block(&block)),
        Value::Number(n) => headers_to_value(parse_header_block(&n.to_string())),
        Value::Bool(b) => headers_to_value(parse_header_block(&b.to_string())),
        Value::Array(pairs) => headers_to_value(collect_header_pairs(&pairs)),
        Value::Object(mapping) => headers_to_value(collect_header_mapping(&mapping)),
        Value::Null => Value::Null,
    }
}

/// Split a `"Name: Value"` block on newlines.
///
/// The first colon on a line separates name from value; both are trimmed.
/// Lines without a colon, or with an empty name or value, are skipped.
pub fn parse_header_block(block: &str) -> Headers {
    let mut headers = Headers::new();

    for line in block.split('\n') {
        let Some((name, value)) = line.split_once(':') else {
            trace!(line, "Dropping header line without a colon");
            continue;
        };

        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            trace!(line, "Dropping header line with an empty name or value");
            continue;
        }

        headers.insert(name.to_string(), value.to_string());
    }

    headers
}

/// Collect `{"key": ..., "value": ...}` objects in order.
///
/// Later duplicates overwrite earlier ones. Entries missing either field, or
/// whose key or value is empty, are skipped.
pub fn collect_header_pairs(pairs: &[Value]) -> Headers {
    let mut headers = Headers::new();

    for pair in pairs {
        let key = pair.get("key").and_then(scalar_to_string);
        let value = pair.get("value").and_then(scalar_to_string);

        match (key, value) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                headers.insert(key, value);
            }
            _ => trace!(%pair, "Dropping incomplete header pair"),
        }
    }

    headers
}

/// Copy an already-mapped header object, keeping scalar values only.
///
/// Entries with an empty name, an empty value or a non-scalar value are skipped.
pub fn collect_header_mapping(mapping: &Map<String, Value>) -> Headers {
    let mut headers = Headers::new();

    for (name, value) in mapping {
        match scalar_to_string(value) {
            Some(value) if !name.is_empty() && !value.is_empty() => {
                headers.insert(name.clone(), value);
            }
            _ => trace!(name, "Dropping header entry without a scalar value"),
        }
    }

    headers
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn headers_to_value(headers: Headers) -> Value {
    Value::Object(
        headers
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}
