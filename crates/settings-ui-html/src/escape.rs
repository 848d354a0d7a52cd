//! Context-specific escapers and boolean attribute markers.

use quick_xml::escape::escape;

use settings_ui_model::HtmlAttributes;

/// Escapes text for use inside a double-quoted attribute value.
pub fn esc_attr(raw: &str) -> String {
    escape(raw).into_owned()
}

/// Escapes text for use as HTML element content.
pub fn esc_html(raw: &str) -> String {
    escape(raw).into_owned()
}

/// Escapes text for use as the body of a `<textarea>`.
pub fn esc_textarea(raw: &str) -> String {
    escape(raw).into_owned()
}

/// Returns `checked="checked"` when both sides have the same text form.
pub fn checked(helper: &str, current: &str) -> &'static str {
    if helper == current {
        r#"checked="checked""#
    } else {
        ""
    }
}

/// Returns `selected="selected"` when both sides have the same text form.
pub fn selected(helper: &str, current: &str) -> &'static str {
    if helper == current {
        r#"selected="selected""#
    } else {
        ""
    }
}

/// Renders an attribute list as space-separated `name="value"` pairs.
pub fn html_attributes(attributes: &HtmlAttributes) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!(r#"{}="{}""#, esc_attr(name), esc_attr(value)))
        .collect::<Vec<_>>()
        .join(" ")
}
