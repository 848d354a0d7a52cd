//! Built-in sanitizers for posted values.
//!
//! Each sanitizer maps the submitted value to the value to persist. Control
//! types install one of these as their default sanitize callback, and a
//! configuration table may name `sanitize_text_field` or
//! `sanitize_textarea_field` as its `sanitize_callback`.

use std::sync::Arc;

use serde_json::{Number, Value};

use settings_ui_html::{sanitize_text_field, sanitize_textarea_field};
use settings_ui_model::SanitizeCallback;
use settings_ui_model::value::{is_truthy, to_text};

/// Plain single-line text.
pub fn text_field(value: Value) -> Value {
    Value::String(sanitize_text_field(&to_text(&value)))
}

/// Multi-line text.
pub fn textarea_field(value: Value) -> Value {
    Value::String(sanitize_textarea_field(&to_text(&value)))
}

/// Coerces to a number. Text is read up to its first non-numeric character,
/// exponents included; anything without a leading number becomes zero.
pub fn number(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(number),
        Value::Bool(flag) => Value::from(u8::from(flag)),
        Value::String(text) => parse_leading_number(&text),
        _ => Value::from(0),
    }
}

/// Coerces to a boolean.
pub fn checkbox(value: Value) -> Value {
    Value::Bool(is_truthy(&value))
}

/// Always the empty string; used by controls that persist nothing.
pub fn nothing(_value: Value) -> Value {
    Value::String(String::new())
}

/// Looks up a sanitizer by the name a configuration table may use.
pub fn by_name(name: &str) -> Option<SanitizeCallback> {
    let callback: SanitizeCallback = match name {
        "sanitize_text_field" => Arc::new(text_field),
        "sanitize_textarea_field" => Arc::new(textarea_field),
        "intval" | "floatval" | "number" => Arc::new(number),
        "boolval" | "checkbox" => Arc::new(checkbox),
        _ => return None,
    };
    Some(callback)
}

fn parse_leading_number(text: &str) -> Value {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let integer_end = end;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if integer_end == digits_start && end <= integer_end + 1 {
        return Value::from(0);
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    let candidate = &trimmed[..end];
    if end == integer_end
        && let Ok(integer) = candidate.parse::<i64>()
    {
        return Value::from(integer);
    }
    candidate
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::from(0), Value::Number)
}
