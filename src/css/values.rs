//! Value helpers: colors, quoted strings, font families, page sizes.

use std::fmt::Write;

use cssparser::{ParseError, Parser, ParserInput, Token};

use super::enum_property;
use super::ident::unescape_ident;
use crate::util::normalize_whitespace;

/// Hex values for the 17 basic color names.
const NAMED_COLORS: [(&str, &str); 17] = [
    ("maroon", "#800000"),
    ("red", "#FF0000"),
    ("orange", "#FFA500"),
    ("yellow", "#FFFF00"),
    ("olive", "#808000"),
    ("purple", "#800080"),
    ("fuchsia", "#FF00FF"),
    ("white", "#FFFFFF"),
    ("lime", "#00FF00"),
    ("green", "#008000"),
    ("navy", "#000080"),
    ("blue", "#0000FF"),
    ("aqua", "#00FFFF"),
    ("teal", "#008080"),
    ("black", "#000000"),
    ("silver", "#C0C0C0"),
    ("gray", "#808080"),
];

/// Properties that apply at run (character) granularity.
const INLINE_PROPERTIES: [&str; 8] = [
    "font-weight",
    "font-style",
    "text-decoration-underline",
    "text-decoration-overline",
    "text-decoration-line-through",
    "color",
    "font-size",
    "font-family",
];

/// Normalize a color value to uppercase `#RRGGBB`.
///
/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` with integer or percentage
/// components, and the 17 basic color names (case-insensitive). Returns `None`
/// for anything else. With `include_hash` false the leading `#` is dropped.
pub fn hex_color(value: &str, include_hash: bool) -> Option<String> {
    let hex = if let Some(digits) = value.strip_prefix('#') {
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
            6 => digits.to_ascii_uppercase(),
            _ => return None,
        }
    } else if value.starts_with("rgb(") && value.ends_with(')') {
        let [r, g, b] = parse_rgb(value)?;
        format!("{r:02X}{g:02X}{b:02X}")
    } else {
        let (_, hex) = NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))?;
        hex[1..].to_string()
    };

    Some(if include_hash { format!("#{hex}") } else { hex })
}

fn parse_rgb(value: &str) -> Option<[u8; 3]> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.expect_function_matching("rgb").ok()?;
    let channels = parser.parse_nested_block(rgb_channels).ok()?;
    parser.expect_exhausted().ok()?;
    Some(channels)
}

fn rgb_channels<'i>(p: &mut Parser<'i, '_>) -> Result<[u8; 3], ParseError<'i, ()>> {
    let r = rgb_channel(p)?;
    p.expect_comma()?;
    let g = rgb_channel(p)?;
    p.expect_comma()?;
    let b = rgb_channel(p)?;
    Ok([r, g, b])
}

/// One `rgb()` component, clamped to 0-255. Percentages are rounded.
fn rgb_channel<'i>(p: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = p.current_source_location();
    match *p.next()? {
        Token::Number { value, .. } => Ok(value.clamp(0.0, 255.0) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        ref token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

/// Wrap a string in double quotes, escaping quotes and backslashes. Control
/// characters become hex escapes such as `\a ` for a newline.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => {
                let _ = write!(out, "\\{:x} ", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Remove the quotes from a single- or double-quoted string and resolve its
/// escapes. Unquoted input is returned unchanged.
pub fn unquote(value: &str) -> String {
    let quote = match value.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return value.to_string(),
    };
    let body = &value[1..];
    unescape_ident(body.strip_suffix(quote).unwrap_or(body))
}

/// Quote a font family name if it contains whitespace.
pub fn encode_font_family(family: &str) -> String {
    if family.chars().any(char::is_whitespace) {
        quote(family)
    } else {
        family.to_string()
    }
}

pub fn decode_font_family(value: &str) -> String {
    unquote(value)
}

/// Whether a (longhand) property applies to runs of text rather than whole
/// paragraphs.
pub fn is_inline_property(name: &str) -> bool {
    INLINE_PROPERTIES.iter().any(|&p| p == name)
}

/// Page size named by the `size` property of an `@page` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    #[default]
    Unknown,
    A4Portrait,
    A4Landscape,
    LetterPortrait,
    LetterLandscape,
}

impl PageSize {
    /// Width and height in points, if known.
    pub fn dimensions_pt(self) -> Option<(f32, f32)> {
        const A4: (f32, f32) = (595.28, 841.89);
        const LETTER: (f32, f32) = (612.0, 792.0);
        match self {
            PageSize::Unknown => None,
            PageSize::A4Portrait => Some(A4),
            PageSize::A4Landscape => Some((A4.1, A4.0)),
            PageSize::LetterPortrait => Some(LETTER),
            PageSize::LetterLandscape => Some((LETTER.1, LETTER.0)),
        }
    }
}

/// Parse a page size such as `A4  portrait`, ignoring case and extra
/// whitespace.
pub fn parse_page_size(value: &str) -> PageSize {
    let normalized = normalize_whitespace(value).to_ascii_lowercase();
    match normalized.as_str() {
        "a4 portrait" => PageSize::A4Portrait,
        "a4 landscape" => PageSize::A4Landscape,
        "letter portrait" => PageSize::LetterPortrait,
        "letter landscape" => PageSize::LetterLandscape,
        _ => PageSize::Unknown,
    }
}

enum_property! {
    /// List marker style keyword.
    pub enum ListStyleType {
        Disc => "disc",
        Circle => "circle",
        Square => "square",
        Decimal => "decimal",
        DecimalLeadingZero => "decimal-leading-zero",
        LowerRoman => "lower-roman",
        UpperRoman => "upper-roman",
        LowerGreek => "lower-greek",
        LowerLatin => "lower-latin",
        UpperLatin => "upper-latin",
        Armenian => "armenian",
        Georgian => "georgian",
        LowerAlpha => "lower-alpha",
        UpperAlpha => "upper-alpha",
        None => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_short_and_long() {
        assert_eq!(hex_color("#f00", true).as_deref(), Some("#FF0000"));
        assert_eq!(hex_color("#a1b2c3", true).as_deref(), Some("#A1B2C3"));
        assert_eq!(hex_color("#a1b2c3", false).as_deref(), Some("A1B2C3"));
        assert_eq!(hex_color("#ggg", true), None);
        assert_eq!(hex_color("#ffff", true), None);
    }

    #[test]
    fn test_hex_color_rgb() {
        assert_eq!(hex_color("rgb(255,0,0)", true).as_deref(), Some("#FF0000"));
        assert_eq!(hex_color("rgb(1, 2, 300)", true).as_deref(), Some("#0102FF"));
        assert_eq!(hex_color("rgb(100%, 50%, 0%)", true).as_deref(), Some("#FF8000"));
        assert_eq!(hex_color("rgb(1,2)", true), None);
        assert_eq!(hex_color("rgb(a,b,c)", true), None);
    }

    #[test]
    fn test_hex_color_names() {
        assert_eq!(hex_color("red", false).as_deref(), Some("FF0000"));
        assert_eq!(hex_color("Orange", true).as_deref(), Some("#FFA500"));
        assert_eq!(hex_color("SILVER", true).as_deref(), Some("#C0C0C0"));
        assert_eq!(hex_color("notacolor", true), None);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("p.Body"), "\"p.Body\"");
        assert_eq!(quote("a\"b\\c\n\t"), r#""a\"b\\c\a \9 ""#);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"p.Body\""), "p.Body");
        assert_eq!(unquote("'single'"), "single");
        assert_eq!(unquote(r#""a\"b\\c\a ""#), "a\"b\\c\n");
        assert_eq!(unquote(r#""\41 B\n""#), "ABn");
        assert_eq!(unquote(r#""\x""#), "x");
        assert_eq!(unquote("bare"), "bare");
        assert_eq!(unquote("\"open"), "open");
    }

    #[test]
    fn test_quote_round_trip() {
        for s in ["", "plain", "with \"quotes\"", "back\\slash", "ctl\u{8}\u{C}\r\n\t"] {
            assert_eq!(unquote(&quote(s)), s);
        }
    }

    #[test]
    fn test_font_family() {
        assert_eq!(encode_font_family("Arial"), "Arial");
        assert_eq!(encode_font_family("Times New Roman"), "\"Times New Roman\"");
        assert_eq!(decode_font_family("\"Times New Roman\""), "Times New Roman");
        assert_eq!(decode_font_family("Arial"), "Arial");
    }

    #[test]
    fn test_inline_properties() {
        assert!(is_inline_property("font-weight"));
        assert!(is_inline_property("text-decoration-overline"));
        assert!(is_inline_property("font-family"));
        assert!(!is_inline_property("text-decoration"));
        assert!(!is_inline_property("margin-left"));
    }

    #[test]
    fn test_page_size() {
        assert_eq!(parse_page_size("A4 portrait"), PageSize::A4Portrait);
        assert_eq!(parse_page_size("  letter \t LANDSCAPE "), PageSize::LetterLandscape);
        assert_eq!(parse_page_size("a5 portrait"), PageSize::Unknown);
        assert_eq!(PageSize::A4Landscape.dimensions_pt(), Some((841.89, 595.28)));
        assert_eq!(PageSize::Unknown.dimensions_pt(), None);
    }

    #[test]
    fn test_list_style_type() {
        assert_eq!(
            ListStyleType::from_css("lower-roman"),
            Some(ListStyleType::LowerRoman)
        );
        assert_eq!(ListStyleType::DecimalLeadingZero.to_string(), "decimal-leading-zero");
        assert_eq!(ListStyleType::from_css("bogus"), None);
    }
}
