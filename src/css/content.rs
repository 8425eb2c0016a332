//! Parsing of the `content` property used for generated text such as heading
//! numbers.

use std::fmt;

use cssparser::{ParseError, Parser, ParserInput, Token};

use super::values::quote;

/// Kind of a generated-content term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentPartKind {
    Normal,
    None,
    String,
    Uri,
    Counter,
    Counters,
    Attr,
    OpenQuote,
    CloseQuote,
    NoOpenQuote,
    NoCloseQuote,
}

/// One term of a `content` value.
///
/// `value` holds the string text, counter name, URI or attribute name.
/// `arg` holds the counter style, if given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPart {
    pub kind: ContentPartKind,
    pub value: String,
    pub arg: Option<String>,
}

impl ContentPart {
    pub fn new(kind: ContentPartKind, value: impl Into<String>, arg: Option<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            arg,
        }
    }

    /// A literal string term.
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ContentPartKind::String, text, None)
    }

    /// A `counter(name)` term.
    pub fn counter(name: impl Into<String>) -> Self {
        Self::new(ContentPartKind::Counter, name, None)
    }
}

impl fmt::Display for ContentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ContentPartKind::Normal => f.write_str("normal"),
            ContentPartKind::None => f.write_str("none"),
            ContentPartKind::String => f.write_str(&quote(&self.value)),
            ContentPartKind::Uri => write!(f, "url({})", quote(&self.value)),
            ContentPartKind::Counter | ContentPartKind::Counters => {
                let function = if self.kind == ContentPartKind::Counter {
                    "counter"
                } else {
                    "counters"
                };
                match &self.arg {
                    Some(style) => write!(f, "{function}({}, {style})", self.value),
                    None => write!(f, "{function}({})", self.value),
                }
            }
            ContentPartKind::Attr => write!(f, "attr({})", self.value),
            ContentPartKind::OpenQuote => f.write_str("open-quote"),
            ContentPartKind::CloseQuote => f.write_str("close-quote"),
            ContentPartKind::NoOpenQuote => f.write_str("no-open-quote"),
            ContentPartKind::NoCloseQuote => f.write_str("no-close-quote"),
        }
    }
}

/// Render content parts as a space-separated `content` value.
pub(crate) fn content_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a `content` value made of quoted strings and `counter(name[, style])`
/// terms.
///
/// Parsing stops at the first term of any other form; the terms before it are
/// returned.
pub fn parse_content(value: &str) -> Vec<ContentPart> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut parts = Vec::new();

    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::QuotedString(text) => parts.push(ContentPart::string(text.as_ref())),
            Token::Function(name) if name.eq_ignore_ascii_case("counter") => {
                match parser.parse_nested_block(parse_counter) {
                    Ok(part) => parts.push(part),
                    Err(_) => break,
                }
            }
            _ => break,
        }
    }

    parts
}

fn parse_counter<'i>(p: &mut Parser<'i, '_>) -> Result<ContentPart, ParseError<'i, ()>> {
    let name = p.expect_ident()?.to_string();
    let style = if p.try_parse(|p| p.expect_comma()).is_ok() {
        Some(p.expect_ident()?.to_string())
    } else {
        None
    };
    Ok(ContentPart::new(ContentPartKind::Counter, name, style))
}
