//! Plain-text sanitizers for posted values.

use quick_xml::events::Event;

use crate::kses::{markup_reader, opens_tag};

/// Removes every tag from `input`, keeping text content.
///
/// The contents of `<script>` and `<style>` elements are removed as well.
pub fn strip_tags(input: &str) -> String {
    parse_and_strip(input).unwrap_or_else(|_| scan_and_strip(input))
}

/// Sanitizes a single-line text value: strips tags, collapses all runs of
/// whitespace (including line breaks and tabs) into single spaces and trims.
pub fn sanitize_text_field(input: &str) -> String {
    collapse_whitespace(&strip_tags(input))
}

/// Sanitizes a multi-line text value: strips tags, normalizes line breaks to
/// `\n` and trims the ends of the value. Indentation and inner spacing are
/// kept.
pub fn sanitize_textarea_field(input: &str) -> String {
    strip_tags(input)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_and_strip(input: &str) -> Result<String, quick_xml::Error> {
    let mut reader = markup_reader(input);
    let mut out = String::with_capacity(input.len());
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                if skip_depth > 0 || is_raw_text_element(element.name().as_ref()) {
                    skip_depth += 1;
                }
            }
            Event::End(element) => {
                if skip_depth > 0 && is_raw_text_element(element.name().as_ref()) {
                    skip_depth -= 1;
                }
            }
            Event::Text(text) if skip_depth == 0 => out.push_str(&String::from_utf8_lossy(&text)),
            Event::CData(data) if skip_depth == 0 => out.push_str(&String::from_utf8_lossy(&data)),
            Event::GeneralRef(reference) if skip_depth == 0 => {
                out.push('&');
                out.push_str(&String::from_utf8_lossy(&reference));
                out.push(';');
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// Fallback for input the markup reader rejects: drops anything that looks
/// like a tag (`<` followed by a letter, `/`, `!` or `?`, up to the next `>`).
fn scan_and_strip(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let starts_tag = c == '<' && chars.peek().is_some_and(|&next| opens_tag(next));
        if starts_tag {
            for skipped in chars.by_ref() {
                if skipped == '>' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_raw_text_element(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script") || name.eq_ignore_ascii_case(b"style")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("a<script>alert(1)</script>b"), "ab");
        assert_eq!(strip_tags("x &amp; y"), "x &amp; y");
    }

    #[test]
    fn falls_back_for_loose_markup() {
        assert_eq!(scan_and_strip("1 < 2 <b>bold</b>"), "1 < 2 bold");
        assert_eq!(scan_and_strip("<!-- note -->text"), "text");
    }

    #[test]
    fn text_field_collapses_whitespace() {
        assert_eq!(sanitize_text_field("  one\n\ttwo   three "), "one two three");
        assert_eq!(sanitize_text_field("<em>Title</em>\r\n"), "Title");
    }

    #[test]
    fn textarea_field_keeps_line_breaks() {
        assert_eq!(
            sanitize_textarea_field("first  line \r\nsecond\t<b>line</b>\n"),
            "first  line \nsecond\tline"
        );
        assert_eq!(sanitize_textarea_field("one\rtwo"), "one\ntwo");
    }

    #[test]
    fn textarea_field_keeps_indentation() {
        assert_eq!(sanitize_textarea_field("a  b\n  c"), "a  b\n  c");
        assert_eq!(sanitize_textarea_field("\n  fn main() {}\n"), "fn main() {}");
    }
}
