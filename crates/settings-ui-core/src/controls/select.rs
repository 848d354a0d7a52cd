//! `<select>` dropdowns.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use settings_ui_html::{esc_attr, esc_html, html_attributes, selected};
use settings_ui_model::args::{DEFAULT, SANITIZE_CALLBACK};
use settings_ui_model::value::{lookup_key, to_text};
use settings_ui_model::{ControlArgs, ControlError, Result, prepare_args};

use crate::control::{Control, Element, join_attributes};
use crate::options::Options;
use crate::registry::ControlType;
use crate::sanitize;

pub const OPTION_VALUES: &str = "option_values";

/// The options of a dropdown as (value, display text) pairs, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    entries: Vec<(String, String)>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a map (value to display text) or a list (display
    /// texts keyed by position).
    pub fn from_value(argument: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(key, display)| (key.clone(), to_text(display)))
                .collect()),
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(index, display)| (index.to_string(), to_text(display)))
                .collect()),
            _ => Err(ControlError::invalid(argument, "a map or list of option values")),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    pub fn display(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, display)| display.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, display)| (key.as_str(), display.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, display)| (key.into(), display.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectElement {
    option_values: OptionValues,
}

impl SelectElement {
    pub fn new(option_values: OptionValues) -> Self {
        Self { option_values }
    }

    pub fn option_values(&self) -> &OptionValues {
        &self.option_values
    }

    /// Replaces the available options.
    pub fn set_option_values(&mut self, option_values: OptionValues) {
        self.option_values = option_values;
    }

    /// Keeps a stored value only if it is one of the options.
    pub(crate) fn restrict(&self, value: Value) -> Value {
        match lookup_key(&value) {
            Some(key) if self.option_values.contains(&key) => value,
            _ => Value::Null,
        }
    }

    pub(crate) fn markup(&self, control: &Control) -> String {
        let current = lookup_key(&control.get_value());
        let mut markup = format!(
            "<select {}>",
            html_attributes(&control.id_and_class_attributes())
        );
        for (key, display) in self.option_values.iter() {
            let marker = current
                .as_deref()
                .map_or("", |current| selected(key, current));
            let attributes =
                join_attributes(&[format!(r#"value="{}""#, esc_attr(key)), marker.to_string()]);
            markup.push_str(&format!("<option {attributes}>{}</option>", esc_html(display)));
        }
        markup.push_str("</select>");
        markup
    }
}

/// Dropdown restricted to `option_values`. Sanitizes as plain text unless
/// another callback is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

impl ControlType for Select {
    fn ui(&self) -> &'static str {
        "select"
    }

    fn description(&self) -> &'static str {
        "Dropdown of fixed options"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control> {
        let mut args = prepare_args(args, &[DEFAULT, OPTION_VALUES])?;
        let option_values = match args.get(OPTION_VALUES) {
            Some(value) => OptionValues::from_value(OPTION_VALUES, value)?,
            None => return Err(ControlError::missing(OPTION_VALUES)),
        };
        if args.sanitize_callback().is_none() && !args.is_set(SANITIZE_CALLBACK) {
            args.set_sanitize_callback(Some(Arc::new(sanitize::text_field)));
        }
        debug!(control = id, options = option_values.len(), "building select control");

        Control::from_args(
            options,
            options_key,
            id,
            &args,
            Element::Select(SelectElement::new(option_values)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MemoryOptions;
    use serde_json::json;

    fn select(options: Arc<MemoryOptions>, option_values: Value) -> Control {
        let args = ControlArgs::from_value(
            "color",
            json!({"tab_id": "t", "default": "red", "option_values": option_values}),
        )
        .unwrap();
        Select.create(options, "", "color", args).unwrap()
    }

    #[test]
    fn value_must_be_an_option() {
        let options = Arc::new(MemoryOptions::new(""));
        let control = select(options.clone(), json!({"red": "Red", "blue": "Blue"}));

        options.set("color", json!("blue"));
        assert_eq!(control.get_value(), json!("blue"));

        options.set("color", json!("green"));
        assert_eq!(control.get_value(), Value::Null);

        options.delete("color");
        assert_eq!(control.get_value(), Value::Null);
    }

    #[test]
    fn list_options_are_keyed_by_position() {
        let options = Arc::new(MemoryOptions::new(""));
        options.set("color", json!(1));
        let control = select(options, json!(["Red", "Blue"]));
        assert_eq!(control.get_value(), json!(1));
        assert_eq!(
            control.element_markup(),
            concat!(
                r#"<select id="color" name="color">"#,
                r#"<option value="0">Red</option>"#,
                r#"<option value="1" selected="selected">Blue</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn option_text_is_escaped() {
        let options = Arc::new(MemoryOptions::new(""));
        let control = select(options, json!({"a&b": "<A & B>"}));
        assert_eq!(
            control.element_markup(),
            concat!(
                r#"<select id="color" name="color">"#,
                r#"<option value="a&amp;b">&lt;A &amp; B&gt;</option></select>"#
            )
        );
    }

    #[test]
    fn option_values_can_be_replaced() {
        let options = Arc::new(MemoryOptions::new(""));
        options.set("color", json!("green"));
        let mut control = select(options, json!({"red": "Red"}));
        assert_eq!(control.get_value(), Value::Null);

        control
            .as_select_mut()
            .unwrap()
            .set_option_values([("green", "Green")].into_iter().collect());
        assert_eq!(control.get_value(), json!("green"));
    }

    #[test]
    fn rejects_scalar_option_values() {
        let args = ControlArgs::from_value(
            "color",
            json!({"tab_id": "t", "default": "", "option_values": "red"}),
        )
        .unwrap();
        let error = Select
            .create(Arc::new(MemoryOptions::new("")), "", "color", args)
            .unwrap_err();
        assert_eq!(
            error,
            ControlError::invalid("option_values", "a map or list of option values")
        );
    }

    #[test]
    fn sanitizes_as_text_by_default() {
        let control = select(Arc::new(MemoryOptions::new("")), json!({"red": "Red"}));
        assert_eq!(control.sanitize(json!(" <b>red</b> ")), json!("red"));
    }
}
