//! Splitting stylesheet text into rules, selector lists and declarations.
//!
//! Tokenizing is left to cssparser; values and selectors are kept as raw
//! source text. Strings and bracketed spans (`()`, `[]`, `{}`) are opaque, so
//! a `;` or `,` inside them never splits anything.
//!
//! A bracket or string that is still open at the end of the input stops the
//! scan. Rule scanning then returns the rules read so far; selector and
//! declaration scanning report failure.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

use super::properties::PropertySet;
use crate::util::trim_css_whitespace;

type ScanResult<'i, T> = Result<T, ParseError<'i, ()>>;

/// Whether the source text of a block or string ends with an unescaped
/// `close`. A lone opening quote does not count as closed.
fn is_closed(text: &str, close: char) -> bool {
    match text.strip_suffix(close) {
        Some(inner) if !inner.is_empty() => {
            inner.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0
        }
        _ => false,
    }
}

/// One `name: value` item of a declaration block.
enum Declaration<'i> {
    Property(&'i str, &'i str),
    /// The value holds a string literal broken by a newline.
    Dropped,
    /// Nothing before the `;`.
    Empty,
    /// `: value` with no name.
    Unnamed,
}

#[derive(Default)]
struct Scanner {
    /// Set when a string literal is broken by a newline or never closed.
    bad_string: bool,
}

impl Scanner {
    /// Consume one token, including any block it opens. Returns `None` at
    /// the end of the current (possibly delimited) input.
    fn consume<'i>(&mut self, input: &mut Parser<'i, '_>) -> ScanResult<'i, Option<Token<'i>>> {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(None),
        };

        let close = match token {
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };
        if let Some(close) = close {
            input.parse_nested_block(|block| self.skip_all(block))?;
            if !is_closed(input.slice_from(start), close) {
                return Err(input.new_custom_error(()));
            }
        }

        match token {
            Token::BadString(_) => self.bad_string = true,
            Token::QuotedString(_) => {
                let text = input.slice_from(start);
                let quote = text.chars().next().unwrap_or('"');
                if !is_closed(text, quote) {
                    self.bad_string = true;
                }
            }
            Token::UnquotedUrl(_) | Token::BadUrl(_) => {
                if !is_closed(input.slice_from(start), ')') {
                    return Err(input.new_custom_error(()));
                }
            }
            _ => {}
        }
        Ok(Some(token))
    }

    fn skip_all<'i>(&mut self, input: &mut Parser<'i, '_>) -> ScanResult<'i, ()> {
        while self.consume(input)?.is_some() {}
        Ok(())
    }

    /// Read `selectors { body }`. Returns `None` when the selector text is
    /// empty. A body left open at the end of the input is accepted.
    fn rule<'i>(&mut self, input: &mut Parser<'i, '_>) -> ScanResult<'i, Option<(String, String)>> {
        let start = input.position();
        input.parse_until_before(Delimiter::CurlyBracketBlock, |prelude| {
            self.skip_all(prelude)
        })?;
        let selectors = trim_css_whitespace(input.slice_from(start));
        if selectors.is_empty() {
            return Ok(None);
        }

        if !matches!(input.next(), Ok(&Token::CurlyBracketBlock)) {
            return Err(input.new_custom_error(()));
        }
        let body_start = input.position();
        let body_end = input.parse_nested_block(|body| {
            self.skip_all(body).map(|()| body.position())
        })?;
        let body = trim_css_whitespace(input.slice(body_start..body_end));
        Ok(Some((selectors.to_string(), body.to_string())))
    }

    fn rules(&mut self, input: &mut Parser<'_, '_>) -> Vec<(String, String)> {
        let mut rules = Vec::new();
        while !input.is_exhausted() {
            input.skip_whitespace();
            match self.rule(input) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) | Err(_) => break,
            }
        }
        rules
    }

    fn selectors<'i>(&mut self, input: &mut Parser<'i, '_>) -> ScanResult<'i, Vec<String>> {
        let mut selectors = Vec::new();
        loop {
            input.skip_whitespace();
            let start = input.position();
            input.parse_until_before(Delimiter::Comma, |selector| self.skip_all(selector))?;
            let selector = trim_css_whitespace(input.slice_from(start));
            if !selector.is_empty() {
                selectors.push(selector.to_string());
            }
            // The comma, or the end of the list.
            if input.next().is_err() {
                return Ok(selectors);
            }
        }
    }

    /// Read one declaration up to (not including) its `;`.
    fn declaration<'i>(&mut self, input: &mut Parser<'i, '_>) -> ScanResult<'i, Declaration<'i>> {
        self.bad_string = false;
        input.skip_whitespace();
        let start = input.position();
        let name_end = loop {
            let end = input.position();
            match self.consume(input)? {
                Some(Token::Colon) => break end,
                Some(_) => {}
                None if trim_css_whitespace(input.slice_from(start)).is_empty() => {
                    return Ok(Declaration::Empty);
                }
                None => return Err(input.new_custom_error(())),
            }
        };
        let name = trim_css_whitespace(input.slice(start..name_end));
        let value_start = input.position();
        self.skip_all(input)?;
        if name.is_empty() {
            return Ok(Declaration::Unnamed);
        }
        if self.bad_string {
            return Ok(Declaration::Dropped);
        }
        let value = trim_css_whitespace(input.slice_from(value_start));
        Ok(Declaration::Property(name, value))
    }

    fn declarations<'i>(
        &mut self,
        input: &mut Parser<'i, '_>,
    ) -> ScanResult<'i, Vec<(String, String)>> {
        let mut properties = Vec::new();
        while !input.is_exhausted() {
            let declaration =
                input.parse_until_after(Delimiter::Semicolon, |d| self.declaration(d))?;
            match declaration {
                Declaration::Property(name, value) => {
                    properties.push((name.to_string(), value.to_string()));
                }
                Declaration::Dropped | Declaration::Empty => {}
                Declaration::Unnamed => break,
            }
        }
        Ok(properties)
    }
}

/// Split stylesheet text into `(selector list text, rule body text)` pairs,
/// in source order.
///
/// Scanning stops at the first structural error; the rules read before it are
/// returned.
pub fn parse_rules(text: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    Scanner::default().rules(&mut parser)
}

/// Split a selector list on top-level commas.
///
/// Returns `None` if the list contains an unclosed bracket.
pub fn parse_selectors(text: &str) -> Option<Vec<String>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    Scanner::default().selectors(&mut parser).ok()
}

/// Parse declaration text into `(name, value)` pairs in source order.
///
/// Returns `None` on a structural error. Declarations whose value contains a
/// broken string literal are dropped.
pub(crate) fn try_parse_properties(text: &str) -> Option<Vec<(String, String)>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    Scanner::default().declarations(&mut parser).ok()
}

/// Parse `name: value; ...` text into a property set without expanding
/// shorthands. Malformed text yields an empty set.
pub fn parse_properties(text: &str) -> PropertySet {
    try_parse_properties(text)
        .map(|pairs| pairs.into_iter().collect())
        .unwrap_or_default()
}
