//! `<input>` controls.
//!
//! The generic [`Input`] type takes its `type` attribute from the
//! `input_type` argument; the other types here fix it and adjust value
//! markup or sanitizing.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use settings_ui_html::{checked, esc_attr, html_attributes};
use settings_ui_model::args::{DEFAULT, HELP_TEXT, INLINE_HELP, LABEL, SANITIZE_CALLBACK};
use settings_ui_model::value::{is_empty, to_text};
use settings_ui_model::{ControlArgs, HtmlAttributes, Result, prepare_args};

use crate::control::{Control, Element, join_attributes};
use crate::options::Options;
use crate::registry::ControlType;
use crate::sanitize;

pub const INPUT_TYPE: &str = "input_type";
pub const BUTTON_CLASS: &str = "button_class";

const INPUT_REQUIRED: &[&str] = &[INPUT_TYPE, DEFAULT];

/// How an input renders and resolves its value.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// `value` is rendered only when non-empty.
    Plain,
    /// `value` is always rendered, zero included.
    Number,
    /// Renders `value="1"` and a `checked` marker.
    Checkbox,
    /// A button whose value is its visible label.
    Submit { button_class: String, button_label: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputElement {
    input_type: String,
    kind: InputKind,
}

impl InputElement {
    pub fn new(input_type: impl Into<String>) -> Self {
        Self::with_kind(input_type, InputKind::Plain)
    }

    pub fn with_kind(input_type: impl Into<String>, kind: InputKind) -> Self {
        Self {
            input_type: input_type.into(),
            kind,
        }
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    pub fn kind(&self) -> &InputKind {
        &self.kind
    }

    /// A value fixed at construction, bypassing the options store.
    pub(crate) fn static_value(&self) -> Option<&Value> {
        match &self.kind {
            InputKind::Submit { button_label, .. } => Some(button_label),
            _ => None,
        }
    }

    pub(crate) fn id_and_class_override(&self, control: &Control) -> Option<HtmlAttributes> {
        let InputKind::Submit { button_class, .. } = &self.kind else {
            return None;
        };
        // Buttons carry no id so several can share a field name.
        let mut attributes = HtmlAttributes::new()
            .with("name", control.get_id())
            .with("class", button_class.clone());
        attributes.extend(control.attributes());
        Some(attributes)
    }

    pub(crate) fn markup(&self, control: &Control) -> String {
        let value = control.get_value();
        let parts = [
            format!(r#"type="{}""#, esc_attr(&self.input_type)),
            html_attributes(&control.id_and_class_attributes()),
            self.value_markup(&value),
        ];
        format!("<input {}/>", join_attributes(&parts))
    }

    fn value_markup(&self, value: &Value) -> String {
        match &self.kind {
            InputKind::Number => format!(r#"value="{}""#, esc_attr(&to_text(value))),
            InputKind::Checkbox => {
                join_attributes(&[r#"value="1""#, checked(&to_text(value), "1")])
            }
            InputKind::Plain | InputKind::Submit { .. } => {
                if is_empty(value) {
                    String::new()
                } else {
                    format!(r#"value="{}""#, esc_attr(&to_text(value)))
                }
            }
        }
    }
}

/// Builds an input control, requiring `input_type` and `default`.
pub fn build_input(
    options: Arc<dyn Options>,
    options_key: &str,
    id: &str,
    args: ControlArgs,
    kind: InputKind,
) -> Result<Control> {
    let args = prepare_args(args, INPUT_REQUIRED)?;
    let input_type = args.required_text(INPUT_TYPE)?;
    debug!(control = id, input_type = %input_type, "building input control");
    Control::from_args(
        options,
        options_key,
        id,
        &args,
        Element::Input(InputElement::with_kind(input_type, kind)),
    )
}

fn default_sanitizer(args: &mut ControlArgs, callback: fn(Value) -> Value) {
    if args.sanitize_callback().is_none() && !args.is_set(SANITIZE_CALLBACK) {
        args.set_sanitize_callback(Some(Arc::new(callback)));
    }
}

/// Generic input; the `type` attribute comes from `input_type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Input;

impl ControlType for Input {
    fn ui(&self) -> &'static str {
        "input"
    }

    fn description(&self) -> &'static str {
        "Input with a configurable type"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control> {
        build_input(options, options_key, id, args, InputKind::Plain)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextInput;

impl ControlType for TextInput {
    fn ui(&self) -> &'static str {
        "text_input"
    }

    fn description(&self) -> &'static str {
        "Single-line text input"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        mut args: ControlArgs,
    ) -> Result<Control> {
        args.insert(INPUT_TYPE, "text");
        build_input(options, options_key, id, args, InputKind::Plain)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInput;

impl ControlType for NumberInput {
    fn ui(&self) -> &'static str {
        "number_input"
    }

    fn description(&self) -> &'static str {
        "Numeric input"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        mut args: ControlArgs,
    ) -> Result<Control> {
        args.insert(INPUT_TYPE, "number");
        default_sanitizer(&mut args, sanitize::number);
        build_input(options, options_key, id, args, InputKind::Number)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxInput;

impl ControlType for CheckboxInput {
    fn ui(&self) -> &'static str {
        "checkbox_input"
    }

    fn description(&self) -> &'static str {
        "Checkbox"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        mut args: ControlArgs,
    ) -> Result<Control> {
        args.insert(INPUT_TYPE, "checkbox");
        default_sanitizer(&mut args, sanitize::checkbox);
        build_input(options, options_key, id, args, InputKind::Checkbox)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenInput;

impl ControlType for HiddenInput {
    fn ui(&self) -> &'static str {
        "hidden_input"
    }

    fn description(&self) -> &'static str {
        "Hidden field"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        mut args: ControlArgs,
    ) -> Result<Control> {
        args.insert(INPUT_TYPE, "hidden");
        args.insert(LABEL, Value::Null);
        args.insert(HELP_TEXT, Value::Null);
        args.insert(INLINE_HELP, false);
        build_input(options, options_key, id, args, InputKind::Plain)
    }
}

/// Submit button. Its value is the `label` argument, or the default when no
/// label is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitInput;

impl ControlType for SubmitInput {
    fn ui(&self) -> &'static str {
        "submit_input"
    }

    fn description(&self) -> &'static str {
        "Submit button"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control> {
        let mut args = prepare_args(args, &[BUTTON_CLASS])?;
        let button_class = args.required_text(BUTTON_CLASS)?;
        let button_label = match args.get(LABEL) {
            Some(label) if !label.is_null() => label.clone(),
            _ => args.get(DEFAULT).cloned().unwrap_or(Value::Null),
        };

        args.insert(INPUT_TYPE, "submit");
        args.insert(LABEL, Value::Null);
        args.insert(HELP_TEXT, Value::Null);
        args.insert(INLINE_HELP, false);

        build_input(
            options,
            options_key,
            id,
            args,
            InputKind::Submit {
                button_class,
                button_label,
            },
        )
    }
}
