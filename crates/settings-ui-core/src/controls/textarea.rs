//! Multi-line `<textarea>` fields.

use std::sync::Arc;

use settings_ui_html::{esc_textarea, html_attributes};
use settings_ui_model::args::{DEFAULT, INLINE_HELP};
use settings_ui_model::value::{is_empty, to_text};
use settings_ui_model::{ControlArgs, Result, prepare_args};

use crate::control::{Control, Element};
use crate::options::Options;
use crate::registry::ControlType;
use crate::sanitize;

/// Textarea. Help text is never rendered inline and posted values are
/// always sanitized as multi-line text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Textarea;

impl ControlType for Textarea {
    fn ui(&self) -> &'static str {
        "textarea"
    }

    fn description(&self) -> &'static str {
        "Multi-line text area"
    }

    fn create(
        &self,
        options: Arc<dyn Options>,
        options_key: &str,
        id: &str,
        args: ControlArgs,
    ) -> Result<Control> {
        let mut args = prepare_args(args, &[DEFAULT])?;
        args.insert(INLINE_HELP, false);
        args.set_sanitize_callback(Some(Arc::new(sanitize::textarea_field)));
        Control::from_args(options, options_key, id, &args, Element::Textarea)
    }
}

pub(crate) fn markup(control: &Control) -> String {
    let value = control.get_value();
    let body = if is_empty(&value) {
        String::new()
    } else {
        esc_textarea(&to_text(&value))
    };
    format!(
        r#"<textarea class="large-text" {}>{body}</textarea>"#,
        html_attributes(&control.id_and_class_attributes())
    )
}
