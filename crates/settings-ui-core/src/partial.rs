//! Wrapper markup around a control's element.
//!
//! A control renders as a `<div>`, or as a `<fieldset>` with a
//! screen-reader legend when other controls are grouped with it. Inside the
//! wrapper come the label, the element (unless the label embeds it), the
//! help text and finally each grouped child, preceded by a line break.

use std::fmt::{self, Write};

use tracing::warn;

use settings_ui_html::{DESCRIPTION_HTML, LABEL_HTML, esc_attr, esc_html, filter_html};

use crate::control::Control;
use crate::set::ControlSet;

impl Control {
    /// Writes the complete markup for this control and its grouped
    /// children, resolving children through `set`.
    pub fn render<W: Write>(&self, set: &ControlSet, out: &mut W) -> fmt::Result {
        let mut stack = Vec::new();
        render_control(self, set, out, &mut stack)
    }

    pub fn render_to_string(&self, set: &ControlSet) -> String {
        let mut markup = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(set, &mut markup);
        markup
    }
}

fn render_control<'a, W: Write>(
    control: &'a Control,
    set: &'a ControlSet,
    out: &mut W,
    stack: &mut Vec<&'a str>,
) -> fmt::Result {
    stack.push(control.id());

    let outer = control.outer_html_attributes();
    let outer = if outer.is_empty() {
        outer
    } else {
        format!(" {outer}")
    };
    let control_id = esc_attr(&control.get_id());
    let grouped = !control.grouped_controls().is_empty();
    let inline_help = control.has_inline_help();

    if grouped {
        write!(out, "<fieldset{outer}>")?;
        write!(
            out,
            r#"<legend class="screen-reader-text">{}</legend>"#,
            esc_html(control.short())
        )?;
    } else {
        write!(out, "<div{outer}>")?;
    }

    // With inline help the label stays open around the element and the
    // help text.
    match control.get_label() {
        Some(label) => {
            let label = filter_html(&label, &LABEL_HTML);
            write!(out, r#"<label for="{control_id}">{label}"#)?;
            if !inline_help {
                out.write_str("</label>")?;
            }
        }
        None if inline_help => write!(out, r#"<label for="{control_id}">"#)?,
        None => {}
    }

    if !control.label_has_placeholder() {
        out.write_str(&control.element_markup())?;
    }

    if let Some(help) = control.help_text() {
        let help = filter_html(help, &DESCRIPTION_HTML);
        if inline_help {
            write!(
                out,
                r#"<span id="{control_id}-description" class="description">{help}</span></label>"#
            )?;
        } else {
            write!(
                out,
                r#"<p id="{control_id}-description" class="description">{help}</p>"#
            )?;
        }
    }

    if grouped {
        for child_id in control.grouped_controls() {
            if stack.contains(&child_id.as_str()) {
                warn!(control = control.id(), child = %child_id, "skipping grouping cycle");
                continue;
            }
            match set.get(child_id) {
                Some(child) => {
                    out.write_str("<br />")?;
                    render_control(child, set, out, stack)?;
                }
                None => {
                    warn!(control = control.id(), child = %child_id, "grouped control not found");
                }
            }
        }
        out.write_str("</fieldset>")?;
    } else {
        out.write_str("</div>")?;
    }

    stack.pop();
    Ok(())
}
