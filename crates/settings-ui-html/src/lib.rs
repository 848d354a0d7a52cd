//! Escaping and sanitizing primitives for control markup.
//!
//! - [`escape`]: attribute, body and textarea escapers, `checked`/`selected`
//!   markers, attribute list rendering
//! - [`kses`]: allow-list filtering for rich-text fields
//! - [`text`]: plain-text and multi-line text sanitizers for posted values

pub mod escape;
pub mod kses;
pub mod text;

pub use escape::{checked, esc_attr, esc_html, esc_textarea, html_attributes, selected};
pub use kses::{AllowList, DESCRIPTION_HTML, DISPLAY_HTML, LABEL_HTML, filter_html};
pub use text::{sanitize_text_field, sanitize_textarea_field, strip_tags};
