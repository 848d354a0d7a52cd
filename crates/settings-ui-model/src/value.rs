//! Helpers for loosely-typed stored values.
//!
//! Settings stores hand back whatever was persisted: strings, numbers,
//! booleans, nested maps. These helpers give the markup and sanitizing code
//! one consistent notion of "empty", "truthy" and "as text".

use serde_json::Value;

/// Returns true for values that count as empty: null, `false`, `""`, `"0"`,
/// zero, and empty lists or maps.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Returns true when the value is not [`is_empty`].
pub fn is_truthy(value: &Value) -> bool {
    !is_empty(value)
}

/// Renders a scalar value as text.
///
/// `true` becomes `"1"`, `false` and null become `""`. Lists and maps have no
/// text form and also become `""`.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
    }
}

/// Returns the key under which a value would be looked up in an option list.
///
/// Null and non-scalar values have no key.
pub fn lookup_key(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        other => Some(to_text(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values() {
        for value in [
            json!(null),
            json!(false),
            json!(""),
            json!("0"),
            json!(0),
            json!(0.0),
            json!([]),
            json!({}),
        ] {
            assert!(is_empty(&value), "{value} should be empty");
        }
        for value in [json!(true), json!("a"), json!(1), json!(-2.5), json!([0])] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn text_forms() {
        assert_eq!(to_text(&json!(true)), "1");
        assert_eq!(to_text(&json!(false)), "");
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(1.5)), "1.5");
        assert_eq!(to_text(&json!("text")), "text");
        assert_eq!(to_text(&json!({"a": 1})), "");
    }

    #[test]
    fn lookup_keys() {
        assert_eq!(lookup_key(&json!(2)), Some("2".to_string()));
        assert_eq!(lookup_key(&json!("two")), Some("two".to_string()));
        assert_eq!(lookup_key(&json!(null)), None);
        assert_eq!(lookup_key(&json!([1])), None);
    }
}
