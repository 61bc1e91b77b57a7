//! Form body reconstruction for the TBO search page.
//!
//! Contract: field values arrive already URL-encoded by the caller. Fields
//! are joined as `key=value` pairs with `&` and nothing is escaped here; a
//! caller that sends raw `&` or `=` inside a value corrupts its own request.
//!
//! Field order is JavaScript property order, which the browser client
//! assumes: array-index keys (`"0"`, `"17"`) first in ascending numeric
//! order, then every other key in the order it was sent.

use serde_json::Value;

/// Largest array index a JavaScript object key can denote.
const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

/// Join the fields of `body` into an `application/x-www-form-urlencoded`
/// string.
///
/// An array body contributes its elements under their indices. Any other
/// non-object body has no fields and yields an empty string.
pub fn encode_prefilled(body: &Value) -> String {
    let fields: Vec<(String, &Value)> = match body {
        Value::Object(map) => {
            let mut indexed = Vec::new();
            let mut named = Vec::new();
            for (key, value) in map {
                match array_index(key) {
                    Some(index) => indexed.push((index, key.clone(), value)),
                    None => named.push((key.clone(), value)),
                }
            }
            indexed.sort_by_key(|&(index, _, _)| index);
            indexed
                .into_iter()
                .map(|(_, key, value)| (key, value))
                .chain(named)
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        _ => Vec::new(),
    };

    fields
        .iter()
        .map(|(key, value)| format!("{key}={}", field_text(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The index a key denotes when it is a canonical array index.
fn array_index(key: &str) -> Option<u64> {
    let canonical = key == "0"
        || (!key.is_empty()
            && !key.starts_with('0')
            && key.bytes().all(|b| b.is_ascii_digit()));
    if !canonical {
        return None;
    }
    key.parse::<u64>()
        .ok()
        .filter(|&index| index <= MAX_ARRAY_INDEX)
}

/// Text form of a field as a browser would stringify it.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => field_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
