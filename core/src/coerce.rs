//! Scalar coercion and literal helpers shared by the engine and the registry.

use serde_json::{Number, Value};

use crate::types::Primitive;

/// Parses a boolean literal.
///
/// Accepts `true`/`false`, `yes`/`no`, `t`/`f`, `y`/`n`, `on`/`off`, `1`/`0`
/// in any letter case.
///
/// # Examples
///
/// ```
/// use parschema_core::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Coerces `value` to `primitive`, returning `None` when that is impossible.
///
/// Typed values pass through unchanged; strings get one attempt at literal
/// parsing. `Any` accepts every value.
pub(crate) fn coerce_scalar(value: &Value, primitive: Primitive) -> Option<Value> {
    match primitive {
        Primitive::Any => Some(value.clone()),
        Primitive::String => value.is_string().then(|| value.clone()),
        Primitive::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        Primitive::Number => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        Primitive::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) => parse_bool(s).map(Value::Bool),
            _ => None,
        },
    }
}

/// Converts a scalar to `primitive` more liberally than [`coerce_scalar`]:
/// numbers and booleans render to strings, whole floats become integers.
pub(crate) fn convert_scalar(value: &Value, primitive: Primitive) -> Option<Value> {
    if let Some(coerced) = coerce_scalar(value, primitive) {
        return Some(coerced);
    }
    match (primitive, value) {
        (Primitive::String, Value::Number(_) | Value::Bool(_)) => {
            Some(Value::String(render_literal(value)))
        }
        (Primitive::Integer, Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| Value::from(f as i64)),
        (Primitive::Integer, Value::Bool(b)) => Some(Value::from(i64::from(*b))),
        (Primitive::Number, Value::Bool(b)) => Some(Value::from(if *b { 1.0 } else { 0.0 })),
        (Primitive::Boolean, Value::Number(n)) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
        _ => None,
    }
}

/// Returns the `allowed` literal that `value` stands for, if any.
///
/// Besides plain equality, numbers compare by value (`2` matches `2.0`) and
/// a string matches a non-string literal with the same textual form, so a
/// command-line token `"4"` selects the literal `4`.
pub(crate) fn enum_member(value: &Value, allowed: &[Value]) -> Option<Value> {
    allowed
        .iter()
        .find(|literal| {
            if *literal == value {
                return true;
            }
            match (*literal, value) {
                (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
                (Value::String(_), _) => false,
                (literal, Value::String(text)) => {
                    !literal.is_array() && !literal.is_object() && render_literal(literal) == *text
                }
                _ => false,
            }
        })
        .cloned()
}

/// Renders a literal the way it would be typed: strings bare, everything
/// else as compact JSON.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Describes a value's shape for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) if n.is_f64() => format!("number {n}"),
        Value::Number(n) => format!("integer {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(items) => format!("sequence of {} item(s)", items.len()),
        Value::Object(map) => format!("mapping with {} key(s)", map.len()),
    }
}
