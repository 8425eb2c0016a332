//! The restricted selector grammar: `element[.class][suffix]`.
//!
//! A base selector names a style (`p`, `h2.Appendix`). The suffix is an
//! opaque key for a sub-rule of that style, such as `::before` or one of the
//! table-part selectors like ` > * > tr > td`.

use super::enum_property;
use super::ident::unescape_ident;

enum_property! {
    /// Element names that carry styles.
    pub enum Tag {
        P => "p",
        H1 => "h1",
        H2 => "h2",
        H3 => "h3",
        H4 => "h4",
        H5 => "h5",
        H6 => "h6",
        Div => "div",
        Blockquote => "blockquote",
        Pre => "pre",
        Span => "span",
        Table => "table",
        Caption => "caption",
        Body => "body",
        Figure => "figure",
        Figcaption => "figcaption",
        Nav => "nav",
        Page => "@page",
    }
}

impl Tag {
    /// 1-6 for `h1`..`h6`, otherwise 0.
    pub fn heading_level(self) -> u8 {
        match self {
            Tag::H1 => 1,
            Tag::H2 => 2,
            Tag::H3 => 3,
            Tag::H4 => 4,
            Tag::H5 => 5,
            Tag::H6 => 6,
            _ => 0,
        }
    }

    /// The heading element for a level in 1-6.
    pub fn heading(level: u8) -> Option<Tag> {
        match level {
            1 => Some(Tag::H1),
            2 => Some(Tag::H2),
            3 => Some(Tag::H3),
            4 => Some(Tag::H4),
            5 => Some(Tag::H5),
            6 => Some(Tag::H6),
            _ => None,
        }
    }
}

enum_property! {
    /// Word-processor style family a selector belongs to.
    pub enum StyleFamily {
        Paragraph => "paragraph",
        Character => "character",
        Table => "table",
        Special => "special",
        Unknown => "unknown",
    }
}

impl StyleFamily {
    pub fn from_tag(tag: Option<Tag>) -> StyleFamily {
        match tag {
            Some(
                Tag::H1
                | Tag::H2
                | Tag::H3
                | Tag::H4
                | Tag::H5
                | Tag::H6
                | Tag::P
                | Tag::Div
                | Tag::Blockquote
                | Tag::Pre,
            ) => StyleFamily::Paragraph,
            Some(Tag::Span) => StyleFamily::Character,
            Some(Tag::Table) => StyleFamily::Table,
            Some(Tag::Body | Tag::Figure | Tag::Figcaption | Tag::Caption) => StyleFamily::Special,
            _ => StyleFamily::Unknown,
        }
    }
}

/// Build `element` or `element.class`. The class name is used verbatim.
pub fn make_selector(element: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("{element}.{class}"),
        None => element.to_string(),
    }
}

fn dot_position(selector: &str) -> Option<usize> {
    memchr::memchr(b'.', selector.as_bytes())
}

/// Everything before the first `.`.
pub fn element_name(selector: &str) -> &str {
    match dot_position(selector) {
        Some(pos) => &selector[..pos],
        None => selector,
    }
}

/// Everything after the first `.`, if there is one.
pub fn class_name(selector: &str) -> Option<&str> {
    dot_position(selector).map(|pos| &selector[pos + 1..])
}

pub fn has_class_name(selector: &str) -> bool {
    dot_position(selector).is_some()
}

pub fn selector_tag(selector: &str) -> Option<Tag> {
    Tag::from_css(element_name(selector))
}

pub fn heading_level(selector: &str) -> u8 {
    selector_tag(selector).map_or(0, Tag::heading_level)
}

pub fn is_heading(selector: &str) -> bool {
    heading_level(selector) > 0
}

pub fn selector_family(selector: &str) -> StyleFamily {
    StyleFamily::from_tag(selector_tag(selector))
}

/// Split a full selector into its base selector and suffix.
///
/// The element name runs up to the first `.`, space or `:`. A class name
/// follows a `.` and may contain escapes; it ends at an unescaped space or
/// `:` and is unescaped in the result. The rest of the input, including any
/// leading space, is the suffix.
///
/// ```ignore
/// assert_eq!(
///     parse_selector("h1.Heading\\20 1::before"),
///     ("h1.Heading 1".to_string(), "::before".to_string())
/// );
/// ```
pub fn parse_selector(input: &str) -> (String, String) {
    let bytes = input.as_bytes();
    let element_end = bytes
        .iter()
        .position(|&c| matches!(c, b'.' | b' ' | b':'))
        .unwrap_or(bytes.len());
    let element = &input[..element_end];

    if bytes.get(element_end) != Some(&b'.') {
        return (element.to_string(), input[element_end..].to_string());
    }

    let class_start = element_end + 1;
    let mut pos = class_start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                pos += 1;
                let hex_start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_hexdigit() {
                    pos += 1;
                }
                if pos == hex_start {
                    // Escaped literal character, possibly multi-byte.
                    if let Some(c) = input[pos..].chars().next() {
                        pos += c.len_utf8();
                    }
                } else if bytes.get(pos) == Some(&b' ') {
                    pos += 1;
                }
            }
            b' ' | b':' => break,
            _ => pos += 1,
        }
    }

    let class = unescape_ident(&input[class_start..pos]);
    (
        make_selector(element, Some(&class)),
        input[pos..].to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_selector() {
        assert_eq!(make_selector("p", None), "p");
        assert_eq!(make_selector("p", Some("Body")), "p.Body");
    }

    #[test]
    fn test_element_and_class_names() {
        assert_eq!(element_name("h1.Title"), "h1");
        assert_eq!(class_name("h1.Title"), Some("Title"));
        assert_eq!(element_name("span"), "span");
        assert_eq!(class_name("span"), None);
        assert_eq!(class_name("p.a.b"), Some("a.b"));
        assert!(has_class_name("table.Grid"));
        assert!(!has_class_name("table"));
    }

    #[test]
    fn test_parse_selector_with_suffix() {
        assert_eq!(
            parse_selector("h1.Heading_1::before"),
            ("h1.Heading_1".to_string(), "::before".to_string())
        );
        assert_eq!(parse_selector("span"), ("span".to_string(), String::new()));
        assert_eq!(
            parse_selector("table.Grid > * > tr > td"),
            ("table.Grid".to_string(), " > * > tr > td".to_string())
        );
        assert_eq!(
            parse_selector("table > * > tr:first-of-type > td"),
            ("table".to_string(), " > * > tr:first-of-type > td".to_string())
        );
    }

    #[test]
    fn test_parse_selector_unescapes_class() {
        assert_eq!(
            parse_selector("p.Body\\20 Text::before"),
            ("p.Body Text".to_string(), "::before".to_string())
        );
        assert_eq!(
            parse_selector("p.\\31 st"),
            ("p.1st".to_string(), String::new())
        );
        assert_eq!(
            parse_selector("p.a\\:b:hover"),
            ("p.a:b".to_string(), ":hover".to_string())
        );
    }

    #[test]
    fn test_families() {
        assert_eq!(selector_family("h3.X"), StyleFamily::Paragraph);
        assert_eq!(selector_family("blockquote"), StyleFamily::Paragraph);
        assert_eq!(selector_family("span.Strong"), StyleFamily::Character);
        assert_eq!(selector_family("table"), StyleFamily::Table);
        assert_eq!(selector_family("figcaption"), StyleFamily::Special);
        assert_eq!(selector_family("nav.tableofcontents"), StyleFamily::Unknown);
        assert_eq!(selector_family("li"), StyleFamily::Unknown);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("h1"), 1);
        assert_eq!(heading_level("h6.Six"), 6);
        assert_eq!(heading_level("p"), 0);
        assert_eq!(heading_level("h7"), 0);
        assert!(is_heading("h2.Appendix"));
        assert!(!is_heading("header"));
        assert_eq!(Tag::heading(4), Some(Tag::H4));
        assert_eq!(Tag::heading(0), None);
    }
}
