// JSON value tree -> SCSS variable declarations

use serde_json::{Map, Number, Value};

/// Top-level values equal to this marker are placeholders and never emitted
const PLACEHOLDER_VALUE: &str = "#";

/// Keys starting with `$`, `@` or `:` collide with SCSS syntax and are dropped
pub fn is_valid_scss_key(key: &str) -> bool {
    key.chars()
        .next()
        .is_some_and(|c| !matches!(c, '$' | '@' | ':'))
}

/// Convert a value tree into `$key: value;` lines.
///
/// Objects emit one declaration per key in document order. Arrays use their
/// indices as keys. Scalars at the root produce no declarations.
pub fn to_declarations(tree: &Value) -> String {
    let entries: Vec<(String, &Value)> = match tree {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter(|(key, _)| is_valid_scss_key(key))
        .filter(|(_, value)| value.as_str() != Some(PLACEHOLDER_VALUE))
        .map(|(key, value)| format!("${}: {};", key, format_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single value as an SCSS expression
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Array(items) => format_list(items),
        Value::Object(map) => format_map(map),
        Value::String(s) if s.is_empty() => "\"\"".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Integral floats (`1e3`, `2.0`) print without a fraction, like JS
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn format_list(items: &[Value]) -> String {
    let inner: Vec<String> = items.iter().map(format_value).collect();
    format!("({})", inner.join(","))
}

fn format_map(map: &Map<String, Value>) -> String {
    let inner: Vec<String> = map
        .iter()
        .filter(|(key, _)| is_valid_scss_key(key))
        .map(|(key, value)| format!("{}: {}", key, format_value(value)))
        .collect();
    format!("({})", inner.join(","))
}
