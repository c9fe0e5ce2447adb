use anyhow::{Result, anyhow};
use serde_json::Value;

/// Read a string field, falling back to `default` when the key is absent or null.
/// Numbers are accepted and rendered as text.
pub fn string_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(as_string)
        .unwrap_or_else(|| default.to_string())
}

/// Read an integer field, falling back to `default` when the key is absent or null.
/// Numeric strings are parsed; fractional values truncate toward zero.
pub fn int_or(value: &Value, key: &str, default: i64) -> Result<i64> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => as_int(v).ok_or_else(|| anyhow!("field `{key}` is not an integer: {v}")),
    }
}

/// Read a numeric field, falling back to `default` when the key is absent or null.
pub fn number_or(value: &Value, key: &str, default: f64) -> Result<f64> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => as_number(v).ok_or_else(|| anyhow!("field `{key}` is not a number: {v}")),
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
