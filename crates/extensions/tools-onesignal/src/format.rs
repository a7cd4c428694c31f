//! Text rendering of provider responses.

use serde_json::Value;

const MISSING: &str = "N/A";

/// `value[key]` as display text. Strings are unquoted; missing and null
/// fields render as `N/A`.
pub fn text(value: &Value, key: &str) -> String {
    text_or(value, key, MISSING)
}

pub fn text_or(value: &Value, key: &str, default: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// English text of a localized field such as `headings` or `contents`.
pub fn localized(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(|field| field.get("en"))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// `Configured` when `value[key]` is present and non-empty.
pub fn configured(value: &Value, key: &str) -> &'static str {
    if value.get(key).is_some_and(is_truthy) {
        "Configured"
    } else {
        "Not Configured"
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Items of a listing response that is either a bare array or an object
/// wrapping the array under `key`.
pub fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        other => other
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    }
}

/// Indented JSON for nested fields like `tags`.
pub fn pretty(value: Option<&Value>) -> String {
    let empty = Value::Object(Default::default());
    let value = value.filter(|v| !v.is_null()).unwrap_or(&empty);
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// `Title:\n\n` followed by the blocks separated by blank lines.
pub fn section(title: &str, blocks: impl IntoIterator<Item = String>) -> String {
    let body: Vec<String> = blocks.into_iter().collect();
    format!("{}:\n\n{}", title, body.join("\n\n"))
}
