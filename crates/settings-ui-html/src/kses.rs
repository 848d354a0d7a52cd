//! Allow-list HTML filtering.
//!
//! Rich-text fields (labels, help texts, display blocks) may carry a small
//! set of inline tags. [`filter_html`] keeps the tags and attributes named by
//! an [`AllowList`], drops every other tag while keeping its text content,
//! and re-escapes attribute values and text.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape, unescape};
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

/// Tags, each with the attributes it may carry.
#[derive(Debug, Clone, Copy)]
pub struct AllowList {
    tags: &'static [(&'static str, &'static [&'static str])],
}

impl AllowList {
    pub const fn new(tags: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { tags }
    }

    /// Returns the allowed attributes for a tag, or `None` if the tag is not allowed.
    pub fn attributes_for(&self, tag: &str) -> Option<&'static [&'static str]> {
        self.tags
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, attributes)| *attributes)
    }

    pub fn allows(&self, tag: &str) -> bool {
        self.attributes_for(tag).is_some()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> {
        self.tags.iter().map(|(name, _)| *name)
    }
}

const INPUT_ATTRIBUTES: &[&str] = &[
    "id",
    "name",
    "value",
    "checked",
    "type",
    "class",
    "aria-describedby",
];

const DISPLAY_ATTRIBUTES: &[&str] = &["id", "name", "class", "aria-describedby"];

/// Tags allowed in labels, which may embed the control element itself.
pub const LABEL_HTML: AllowList = AllowList::new(&[
    ("span", &["class"]),
    ("input", INPUT_ATTRIBUTES),
    ("select", INPUT_ATTRIBUTES),
    ("option", &["value", "selected"]),
    ("code", &[]),
    ("strong", &[]),
    ("em", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("br", &[]),
]);

/// Tags allowed in help texts.
pub const DESCRIPTION_HTML: AllowList = AllowList::new(&[
    ("code", &[]),
    ("strong", &[]),
    ("em", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("br", &[]),
    ("span", &["class"]),
]);

/// Tags allowed in read-only display blocks.
pub const DISPLAY_HTML: AllowList = AllowList::new(&[
    ("div", DISPLAY_ATTRIBUTES),
    ("span", DISPLAY_ATTRIBUTES),
    ("p", DISPLAY_ATTRIBUTES),
    ("ul", DISPLAY_ATTRIBUTES),
    ("ol", DISPLAY_ATTRIBUTES),
    ("li", DISPLAY_ATTRIBUTES),
    ("a", &["class", "href", "rel", "target"]),
    ("code", &[]),
    ("strong", &[]),
    ("em", &[]),
    ("sub", &[]),
    ("sup", &[]),
]);

/// URL schemes accepted in `href` attributes. Relative URLs are always accepted.
const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "mailto", "ftp", "tel"];

const BOOLEAN_ATTRIBUTES: &[&str] = &["checked", "selected"];

/// Filters `input` down to the tags and attributes of `allowed`.
///
/// A `<` that cannot open a tag is kept as `&lt;`. Markup that still cannot
/// be parsed is escaped as a whole.
pub fn filter_html(input: &str, allowed: &AllowList) -> String {
    match try_filter_html(&escape_stray_brackets(input), allowed) {
        Ok(filtered) => filtered,
        Err(error) => {
            warn!(%error, "escaping markup that could not be filtered");
            escape(input).into_owned()
        }
    }
}

fn try_filter_html(input: &str, allowed: &AllowList) -> Result<String, quick_xml::Error> {
    let mut reader = markup_reader(input);
    let mut out = String::with_capacity(input.len());

    loop {
        match reader.read_event()? {
            Event::Start(element) => write_start(&mut out, &element, allowed, false),
            Event::Empty(element) => write_start(&mut out, &element, allowed, true),
            Event::End(element) => {
                let tag = lowercase_name(element.name().as_ref());
                if allowed.allows(&tag) {
                    out.push_str("</");
                    out.push_str(&tag);
                    out.push('>');
                }
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                out.push_str(&partial_escape(&*raw));
            }
            Event::CData(data) => {
                let raw = String::from_utf8_lossy(&data);
                out.push_str(&escape(&*raw));
            }
            Event::GeneralRef(reference) => {
                push_reference(&mut out, String::from_utf8_lossy(&reference).as_ref());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// Whether `next`, following a `<`, starts a tag, comment or declaration.
pub(crate) fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
}

/// Replaces each `<` that does not open a tag with `&lt;`.
fn escape_stray_brackets(input: &str) -> Cow<'_, str> {
    if !input.contains('<') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '<' && !chars.peek().is_some_and(|&next| opens_tag(next)) {
            out.push_str("&lt;");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Builds a reader lenient enough for HTML fragments.
pub(crate) fn markup_reader(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

fn write_start(out: &mut String, element: &BytesStart<'_>, allowed: &AllowList, empty: bool) {
    let tag = lowercase_name(element.name().as_ref());
    let Some(allowed_attributes) = allowed.attributes_for(&tag) else {
        return;
    };

    out.push('<');
    out.push_str(&tag);
    for attribute in element.html_attributes().flatten() {
        let name = lowercase_name(attribute.key.as_ref());
        if !allowed_attributes.contains(&name.as_str()) {
            continue;
        }
        let raw = String::from_utf8_lossy(&attribute.value);
        let mut value = unescape(&raw).unwrap_or(Cow::Borrowed(&*raw)).into_owned();
        if value.is_empty() && BOOLEAN_ATTRIBUTES.contains(&name.as_str()) {
            value = name.clone();
        }
        if name == "href" && !is_allowed_url(&value) {
            continue;
        }
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    out.push_str(if empty { "/>" } else { ">" });
}

fn push_reference(out: &mut String, name: &str) {
    let named = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric());
    let numeric = name
        .strip_prefix('#')
        .is_some_and(|rest| {
            let digits = rest.strip_prefix(['x', 'X']).unwrap_or(rest);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
        });
    if named || numeric {
        out.push('&');
        out.push_str(name);
        out.push(';');
    } else {
        out.push_str("&amp;");
        out.push_str(&escape(name));
        out.push(';');
    }
}

fn lowercase_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn is_allowed_url(url: &str) -> bool {
    let trimmed = url.trim();
    let scheme_end = trimmed.find(':');
    let path_start = trimmed.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (None, _) => true,
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = trimmed[..colon].to_ascii_lowercase();
            ALLOWED_PROTOCOLS.contains(&scheme.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_tags() {
        assert_eq!(
            filter_html("Use <code>foo</code> or <strong>bar</strong>", &DESCRIPTION_HTML),
            "Use <code>foo</code> or <strong>bar</strong>"
        );
    }

    #[test]
    fn drops_disallowed_tags_but_keeps_text() {
        assert_eq!(
            filter_html("<div><b>bold</b> text</div>", &DESCRIPTION_HTML),
            "bold text"
        );
        assert_eq!(filter_html("<foo>Foo</foo><bar/>", &DISPLAY_HTML), "Foo");
    }

    #[test]
    fn drops_disallowed_attributes() {
        assert_eq!(
            filter_html(
                r#"<span class="note" style="color:red" onclick="x()">hi</span>"#,
                &DESCRIPTION_HTML
            ),
            r#"<span class="note">hi</span>"#
        );
    }

    #[test]
    fn keeps_input_elements_in_labels() {
        let label = concat!(
            r#"Enable <input type="checkbox" id="opt[a]" name="opt[a]" value="1" "#,
            r#"checked="checked" data-x="y"/> now"#
        );
        assert_eq!(
            filter_html(label, &LABEL_HTML),
            concat!(
                r#"Enable <input type="checkbox" id="opt[a]" name="opt[a]" value="1" "#,
                r#"checked="checked"/> now"#
            )
        );
    }

    #[test]
    fn valueless_boolean_attributes() {
        assert_eq!(
            filter_html("<option value=\"1\" selected>One</option>", &LABEL_HTML),
            r#"<option value="1" selected="selected">One</option>"#
        );
    }

    #[test]
    fn unclosed_line_breaks() {
        assert_eq!(filter_html("one<br>two", &DESCRIPTION_HTML), "one<br>two");
        assert_eq!(filter_html("one<br />two", &DESCRIPTION_HTML), "one<br/>two");
    }

    #[test]
    fn preserves_entities() {
        assert_eq!(
            filter_html("Fish &amp; chips&nbsp;&#169;", &DESCRIPTION_HTML),
            "Fish &amp; chips&nbsp;&#169;"
        );
    }

    #[test]
    fn rejects_script_urls() {
        assert_eq!(
            filter_html(r#"<a href="javascript:alert(1)" class="x">link</a>"#, &DISPLAY_HTML),
            r#"<a class="x">link</a>"#
        );
        let link = r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank">link</a>"#;
        assert_eq!(filter_html(link, &DISPLAY_HTML), link);
        assert!(is_allowed_url("/wp-admin/options.php"));
        assert!(is_allowed_url("page#a:b"));
    }

    #[test]
    fn stray_angle_brackets_keep_surrounding_tags() {
        assert_eq!(filter_html("a < b", &DESCRIPTION_HTML), "a &lt; b");
        assert_eq!(
            filter_html("Use <code>n</code> where n < 10 or n <= 3", &DESCRIPTION_HTML),
            "Use <code>n</code> where n &lt; 10 or n &lt;= 3"
        );
        assert_eq!(
            filter_html(r#"<input type="checkbox" id="limit"/> Keep fewer than < 10"#, &LABEL_HTML),
            r#"<input type="checkbox" id="limit"/> Keep fewer than &lt; 10"#
        );
        assert_eq!(filter_html("<3 <b>x</b>", &DESCRIPTION_HTML), "&lt;3 x");
    }

    #[test]
    fn allow_list_lookup_ignores_case() {
        assert!(LABEL_HTML.allows("INPUT"));
        assert!(!DESCRIPTION_HTML.allows("input"));
        assert_eq!(DISPLAY_HTML.attributes_for("a"), Some(&["class", "href", "rel", "target"][..]));
    }
}
