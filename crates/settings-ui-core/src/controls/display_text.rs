//! Read-only markup blocks.

use std::sync::Arc;

use serde_json::Value;

use settings_ui_html::{DISPLAY_HTML, filter_html};
use settings_ui_model::args::{DEFAULT, LABEL};
use settings_ui_model::value::to_text;
use settings_ui_model::{ControlArgs, ControlError, Result, prepare_args};

use crate::control::{Control, Element};
use crate::options::Options;
use crate::registry::ControlType;
use crate::sanitize;

pub const ELEMENTS: &str = "elements";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTextElement {
    elements: Vec<String>,
}

impl DisplayTextElement {
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// The concatenated fragments, filtered to the display allow-list.
    pub(crate) fn markup(&self) -> String {
        filter_html(&self.elements.concat(), &DISPLAY_HTML)
    }
}

/// Static markup assembled from the `elements` fragments. Has no label,
/// no value and persists nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayText;

impl ControlType for DisplayText {
    fn ui(&self) -> &'static str {
        "display_text"
    }

    fn description(&self) -> &'static str {
        "Read-only text"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control> {
        let mut args = prepare_args(args, &[ELEMENTS])?;
        let elements = match args.get(ELEMENTS) {
            Some(Value::Array(items)) => items.iter().map(to_text).collect(),
            _ => return Err(ControlError::invalid(ELEMENTS, "a list of markup fragments")),
        };

        args.insert(LABEL, Value::Null);
        args.insert(DEFAULT, "");
        args.set_sanitize_callback(Some(Arc::new(sanitize::nothing)));

        Control::from_args(
            options,
            options_key,
            id,
            &args,
            Element::DisplayText(DisplayTextElement::new(elements)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MemoryOptions;
    use serde_json::json;

    fn display(elements: Value) -> Result<Control> {
        let options = Arc::new(MemoryOptions::new(""));
        options.set("intro", json!("stored"));
        let args = ControlArgs::from_value(
            "intro",
            json!({"tab_id": "t", "label": "Ignored", "default": "x", "elements": elements}),
        )?;
        DisplayText.create(options, "", "intro", args)
    }

    #[test]
    fn concatenates_allowed_fragments() {
        let control = display(json!([
            "<p class=\"lead\">Hello ",
            "<strong>world</strong></p>",
            "<script>alert(1)</script>"
        ]))
        .unwrap();
        assert_eq!(
            control.element_markup(),
            r#"<p class="lead">Hello <strong>world</strong></p>alert(1)"#
        );
    }

    #[test]
    fn has_no_label_value_or_persisted_data() {
        let control = display(json!(["text"])).unwrap();
        assert_eq!(control.label(), None);
        assert_eq!(control.get_default(), &json!(""));
        assert_eq!(control.get_value(), json!(""));
        assert_eq!(control.sanitize(json!("posted")), json!(""));
    }

    #[test]
    fn requires_elements_list() {
        assert_eq!(
            display(Value::Null).unwrap_err(),
            ControlError::missing("elements")
        );
        assert_eq!(
            display(json!("<p>x</p>")).unwrap_err(),
            ControlError::invalid("elements", "a list of markup fragments")
        );
    }
}
