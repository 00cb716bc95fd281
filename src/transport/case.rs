//! Key case conversion between the in-memory (camelCase) and wire (snake_case)
//! conventions. Only object keys are rewritten; values are never touched.

use serde_json::{Map, Value};

/// Rewrite every object key from camelCase to snake_case, recursively.
pub fn to_wire(value: Value) -> Value {
    transform_keys(value, camel_to_snake)
}

/// Rewrite every object key from snake_case to camelCase, recursively.
pub fn from_wire(value: Value) -> Value {
    transform_keys(value, snake_to_camel)
}

fn transform_keys(value: Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (convert(&key), transform_keys(value, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_keys(item, convert))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// `sentAt` -> `sent_at`. Every ASCII capital becomes `_` plus its lowercase.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `sent_at` -> `sentAt`. Only `_` followed by an ASCII lowercase letter is
/// collapsed; other underscores are kept.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}
