//! The control record and its shared algorithms.
//!
//! Every control type is a [`Control`]: one record holding the state all
//! types share (identity, placement, labels, attributes, grouping links)
//! plus an [`Element`] payload with the type-specific data. Behavior that
//! differs per type (current value, element markup) dispatches on the
//! payload; everything else lives here.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use settings_ui_html::html_attributes;
use settings_ui_model::args::{
    ATTRIBUTES, DEFAULT, HELP_TEXT, INLINE_HELP, LABEL, OUTER_ATTRIBUTES, SANITIZE_CALLBACK,
    SECTION, SETTINGS_ARGS, SHORT, TAB_ID,
};
use settings_ui_model::{ControlArgs, HtmlAttributes, Result, SanitizeCallback};

use crate::controls::display_text::DisplayTextElement;
use crate::controls::input::InputElement;
use crate::controls::select::SelectElement;
use crate::controls::textarea;
use crate::options::Options;
use crate::registrar::{SettingsField, SettingsRegistrar};
use crate::sanitize;

/// Marks where a label embeds the rendered element markup.
///
/// Only the first occurrence is substituted; no other formatting applies.
pub const LABEL_PLACEHOLDER: &str = "%1$s";

/// Type-specific payload of a control.
#[derive(Debug, Clone)]
pub enum Element {
    /// `<input>` with an open-ended `type`.
    Input(InputElement),
    /// `<select>` with a fixed list of options.
    Select(SelectElement),
    /// `<textarea>`.
    Textarea,
    /// Read-only markup without a form field.
    DisplayText(DisplayTextElement),
}

/// One form field (or field group) bound to a settings entry.
#[derive(Clone)]
pub struct Control {
    options: Arc<dyn Options>,
    options_key: Option<String>,
    id: String,
    tab_id: String,
    section: String,
    short: String,
    label: Option<String>,
    help_text: Option<String>,
    inline_help: bool,
    default: Value,
    attributes: HtmlAttributes,
    outer_attributes: HtmlAttributes,
    settings_args: Map<String, Value>,
    sanitize_callback: Option<SanitizeCallback>,
    grouped_controls: Vec<String>,
    grouped_with: Option<String>,
    element: Element,
}

impl Control {
    /// Builds a control from normalized arguments (see
    /// [`prepare_args`](settings_ui_model::prepare_args)).
    ///
    /// An empty `options_key` means the control id is the store key.
    pub fn from_args(
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: &ControlArgs,
        element: Element,
    ) -> Result<Self> {
        let tab_id = args.required_text(TAB_ID)?;
        let section = args.text(SECTION).unwrap_or_else(|| tab_id.clone());
        let sanitize_callback = args.sanitize_callback().cloned().or_else(|| {
            args.text(SANITIZE_CALLBACK)
                .and_then(|name| sanitize::by_name(&name))
        });

        Ok(Self {
            options,
            options_key: Some(options_key.to_string()).filter(|key| !key.is_empty()),
            id: id.to_string(),
            tab_id,
            section,
            short: args.text(SHORT).unwrap_or_default(),
            label: non_empty_text(args, LABEL),
            help_text: non_empty_text(args, HELP_TEXT),
            inline_help: args.flag(INLINE_HELP),
            default: args
                .get(DEFAULT)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            attributes: args.attributes(ATTRIBUTES)?,
            outer_attributes: args.attributes(OUTER_ATTRIBUTES)?,
            settings_args: args.map(SETTINGS_ARGS)?,
            sanitize_callback,
            grouped_controls: Vec::new(),
            grouped_with: None,
            element,
        })
    }

    /// The control id, unique within its options group.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options_key(&self) -> Option<&str> {
        self.options_key.as_deref()
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    /// The raw label text, placeholder included.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn inline_help(&self) -> bool {
        self.inline_help
    }

    pub fn attributes(&self) -> &HtmlAttributes {
        &self.attributes
    }

    pub fn outer_attributes(&self) -> &HtmlAttributes {
        &self.outer_attributes
    }

    pub fn settings_args(&self) -> &Map<String, Value> {
        &self.settings_args
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Returns the select payload, if this is a select control.
    pub fn as_select_mut(&mut self) -> Option<&mut SelectElement> {
        match &mut self.element {
            Element::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Ids of the controls grouped with this one, in rendering order.
    pub fn grouped_controls(&self) -> &[String] {
        &self.grouped_controls
    }

    /// Id of the control this one is grouped with.
    pub fn grouped_with(&self) -> Option<&str> {
        self.grouped_with.as_deref()
    }

    /// Retrieves the current value for display.
    pub fn get_value(&self) -> Value {
        match &self.element {
            Element::Input(input) => input
                .static_value()
                .cloned()
                .unwrap_or_else(|| self.stored_value()),
            Element::Select(select) => select.restrict(self.stored_value()),
            Element::Textarea => self.stored_value(),
            Element::DisplayText(_) => Value::String(String::new()),
        }
    }

    /// Resolves the persisted value from the options store.
    ///
    /// Without an options key the value stored at the control id is the
    /// value. With one, the value is the `id` field of the map stored at the
    /// options key, or null if the field is absent. The default is never
    /// substituted.
    pub fn stored_value(&self) -> Value {
        let key = self.options_key.as_deref().unwrap_or(&self.id);
        let stored = self.options.get(key);
        trace!(control = %self.id, key, "resolving control value");

        if key == self.id {
            return stored;
        }
        match stored {
            Value::Object(mut map) => map.remove(&self.id).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    pub fn get_default(&self) -> &Value {
        &self.default
    }

    /// Retrieves the fully qualified form field name.
    pub fn get_id(&self) -> String {
        match &self.options_key {
            Some(key) => format!("{}[{}]", self.options.get_name(key), self.id),
            None => self.options.get_name(&self.id),
        }
    }

    pub fn label_has_placeholder(&self) -> bool {
        self.label
            .as_deref()
            .is_some_and(|label| label.contains(LABEL_PLACEHOLDER))
    }

    pub fn has_inline_help(&self) -> bool {
        self.inline_help && self.help_text.is_some()
    }

    /// Retrieves the label, with the placeholder replaced by the element
    /// markup when present.
    pub fn get_label(&self) -> Option<String> {
        let label = self.label.as_deref()?;
        if label.contains(LABEL_PLACEHOLDER) {
            Some(label.replacen(LABEL_PLACEHOLDER, &self.element_markup(), 1))
        } else {
            Some(label.to_string())
        }
    }

    /// Retrieves the type-specific element markup.
    pub fn element_markup(&self) -> String {
        match &self.element {
            Element::Input(input) => input.markup(self),
            Element::Select(select) => select.markup(self),
            Element::Textarea => textarea::markup(self),
            Element::DisplayText(display) => display.markup(),
        }
    }

    /// Attributes identifying the element: `id`, `name`, the configured
    /// attributes and `aria-describedby` when there is help text.
    pub fn id_and_class_attributes(&self) -> HtmlAttributes {
        if let Element::Input(input) = &self.element
            && let Some(attributes) = input.id_and_class_override(self)
        {
            return attributes;
        }

        let id = self.get_id();
        let mut attributes = HtmlAttributes::new()
            .with("id", id.clone())
            .with("name", id.clone());
        attributes.extend(&self.attributes);
        if self.help_text.is_some() {
            attributes.insert("aria-describedby", format!("{id}-description"));
        }
        attributes
    }

    pub fn inner_html_attributes(&self) -> String {
        html_attributes(&self.attributes)
    }

    pub fn outer_html_attributes(&self) -> String {
        html_attributes(&self.outer_attributes)
    }

    /// Registers the control with the host settings mechanism.
    ///
    /// Grouped children are rendered by their parent and are not registered.
    pub fn register(&self, option_group: &str, registrar: &mut dyn SettingsRegistrar) {
        if self.grouped_with.is_some() {
            return;
        }
        registrar.add_settings_field(SettingsField {
            id: self.get_id(),
            title: self.short.clone(),
            render_callback: self.id.clone(),
            page: format!("{option_group}{}", self.tab_id),
            section: self.section.clone(),
            args: self.settings_args.clone(),
        });
    }

    /// Groups another control with this one. A control with the same id as
    /// this one is ignored.
    pub fn add_grouped_control(&mut self, other: &mut Control) {
        if other.id == self.id {
            return;
        }
        if !self.grouped_controls.contains(&other.id) {
            self.grouped_controls.push(other.id.clone());
        }
        other.group_with(self);
    }

    /// Marks this control as grouped with `other`. A control with the same
    /// id as this one is ignored.
    pub fn group_with(&mut self, other: &Control) {
        if other.id != self.id {
            self.grouped_with = Some(other.id.clone());
        }
    }

    pub(crate) fn remove_grouped_control(&mut self, id: &str) {
        self.grouped_controls.retain(|child| child != id);
    }

    /// Sanitizes a posted value with the configured callback, or returns it
    /// unchanged when there is none.
    pub fn sanitize(&self, value: Value) -> Value {
        match &self.sanitize_callback {
            Some(callback) => callback(value),
            None => value,
        }
    }

    pub fn has_sanitize_callback(&self) -> bool {
        self.sanitize_callback.is_some()
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("options_key", &self.options_key)
            .field("tab_id", &self.tab_id)
            .field("section", &self.section)
            .field("short", &self.short)
            .field("label", &self.label)
            .field("help_text", &self.help_text)
            .field("inline_help", &self.inline_help)
            .field("default", &self.default)
            .field("attributes", &self.attributes)
            .field("outer_attributes", &self.outer_attributes)
            .field("settings_args", &self.settings_args)
            .field("sanitize_callback", &self.sanitize_callback.is_some())
            .field("grouped_controls", &self.grouped_controls)
            .field("grouped_with", &self.grouped_with)
            .field("element", &self.element)
            .finish()
    }
}

/// Joins non-empty attribute fragments with single spaces.
pub(crate) fn join_attributes<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty_text(args: &ControlArgs, key: &str) -> Option<String> {
    args.text(key).filter(|text| !text.is_empty())
}
