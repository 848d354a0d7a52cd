//! Control configuration arguments and their normalization.
//!
//! A control is described by a keyword mapping, typically one entry of a
//! configuration table. [`prepare_args`] checks the keys a control type
//! requires and fills in defaults for the optional ones. Keys it does not
//! know about are left alone so control types can read their own extras
//! (`option_values`, `elements`, `button_class`, ...).

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attributes::HtmlAttributes;
use crate::error::{ControlError, Result};
use crate::value::{is_truthy, to_text};

/// A sanitizer applied to posted values before they are persisted.
pub type SanitizeCallback = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Keys every control requires.
pub const BASELINE_REQUIRED: &[&str] = &["tab_id"];

pub const TAB_ID: &str = "tab_id";
pub const SECTION: &str = "section";
pub const SHORT: &str = "short";
pub const LABEL: &str = "label";
pub const HELP_TEXT: &str = "help_text";
pub const INLINE_HELP: &str = "inline_help";
pub const DEFAULT: &str = "default";
pub const ATTRIBUTES: &str = "attributes";
pub const OUTER_ATTRIBUTES: &str = "outer_attributes";
pub const SETTINGS_ARGS: &str = "settings_args";
pub const SANITIZE_CALLBACK: &str = "sanitize_callback";

/// Keyword arguments for building a control.
///
/// Plain values live in a JSON map. A sanitize callback cannot be expressed
/// as JSON, so it is carried alongside. The map may still hold a
/// `sanitize_callback` string naming a built-in sanitizer.
#[derive(Clone, Default)]
pub struct ControlArgs {
    values: Map<String, Value>,
    sanitize_callback: Option<SanitizeCallback>,
}

impl ControlArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values,
            sanitize_callback: None,
        }
    }

    /// Builds arguments from a JSON value, which must be a map.
    pub fn from_value(argument: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self::from_map(values)),
            _ => Err(ControlError::invalid(argument, "a map of control arguments")),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_sanitize_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.sanitize_callback = Some(Arc::new(callback));
        self
    }

    pub fn set_sanitize_callback(&mut self, callback: Option<SanitizeCallback>) {
        self.sanitize_callback = callback;
    }

    pub fn sanitize_callback(&self) -> Option<&SanitizeCallback> {
        self.sanitize_callback.as_ref()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true when the key is present with a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }

    /// Reads a key as text; null and absent keys yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(to_text(value)),
        }
    }

    /// Reads a required key as text.
    pub fn required_text(&self, key: &str) -> Result<String> {
        self.text(key).ok_or_else(|| ControlError::missing(key))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(is_truthy)
    }

    pub fn attributes(&self, key: &str) -> Result<HtmlAttributes> {
        match self.values.get(key) {
            None => Ok(HtmlAttributes::new()),
            Some(value) => HtmlAttributes::from_value(key, value),
        }
    }

    /// Reads a key as a map; null and absent keys yield an empty map.
    pub fn map(&self, key: &str) -> Result<Map<String, Value>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(ControlError::invalid(key, "a map")),
        }
    }
}

impl fmt::Debug for ControlArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlArgs")
            .field("values", &self.values)
            .field("sanitize_callback", &self.sanitize_callback.is_some())
            .finish()
    }
}

impl PartialEq for ControlArgs {
    fn eq(&self, other: &Self) -> bool {
        let same_callback = match (&self.sanitize_callback, &other.sanitize_callback) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_callback && self.values == other.values
    }
}

impl From<Map<String, Value>> for ControlArgs {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}

/// Checks required keys and fills in defaults for optional ones.
///
/// `tab_id` is always required in addition to `required`. A key counts as
/// missing when it is absent or null; the error names the first missing key.
/// Values supplied by the caller always win over defaults. Normalizing an
/// already normalized set of arguments returns it unchanged.
pub fn prepare_args(mut args: ControlArgs, required: &[&str]) -> Result<ControlArgs> {
    for key in BASELINE_REQUIRED.iter().chain(required) {
        if !args.is_set(key) {
            return Err(ControlError::missing(*key));
        }
    }

    let tab_id = args.get(TAB_ID).cloned().unwrap_or(Value::Null);
    let defaults: [(&str, Value); 10] = [
        (SECTION, tab_id),
        (SHORT, Value::Null),
        (LABEL, Value::Null),
        (HELP_TEXT, Value::Null),
        (INLINE_HELP, Value::Bool(false)),
        (DEFAULT, Value::String(String::new())),
        (ATTRIBUTES, Value::Object(Map::new())),
        (OUTER_ATTRIBUTES, Value::Object(Map::new())),
        (SETTINGS_ARGS, Value::Object(Map::new())),
        (SANITIZE_CALLBACK, Value::Null),
    ];
    for (key, value) in defaults {
        if !args.contains_key(key) {
            args.values.insert(key.to_string(), value);
        }
    }

    Ok(args)
}
