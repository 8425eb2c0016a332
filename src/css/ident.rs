//! CSS identifier escaping for class names.

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Escape a string so it can be used as a CSS class name.
///
/// Letters and underscores pass through, as do digits and hyphens after the
/// first position. A single leading hyphen is kept unless it is the whole
/// identifier. Everything else becomes a hex escape followed by a space; the
/// space is dropped at the very end of the output.
pub fn escape_ident(unescaped: &str) -> String {
    let mut out = String::with_capacity(unescaped.len());
    let mut chars = unescaped.chars().peekable();

    if chars.next_if_eq(&'-').is_some() {
        out.push_str(if chars.peek().is_none() { "\\2d" } else { "-" });
    }

    let mut first = true;
    for c in chars {
        if (first && is_name_start(c)) || (!first && is_name_char(c)) {
            out.push(c);
        } else {
            out.push_str(&format!("\\{:x} ", u32::from(c)));
        }
        first = false;
    }

    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out
}

/// Whether an [`escape_ident`] result ends in a hex escape. Such a name needs
/// a separating space before any whitespace that follows it in a selector.
pub(crate) fn ends_with_hex_escape(escaped: &str) -> bool {
    escaped.rfind('\\').is_some_and(|pos| {
        let digits = &escaped[pos + 1..];
        (1..=6).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

/// Reverse [`escape_ident`].
///
/// `\` followed by one to six hex digits decodes to that code point and
/// swallows one following whitespace character (CRLF counts as one). Any other
/// escaped character stands for itself.
pub fn unescape_ident(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut value = 0u32;
        let mut digits = 0;
        while digits < 6 {
            match chars.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    chars.next();
                    digits += 1;
                }
                None => break,
            }
        }

        if digits == 0 {
            if let Some(literal) = chars.next() {
                out.push(literal);
            }
            continue;
        }

        out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
        match chars.peek() {
            Some(' ' | '\t' | '\n' | '\x0C') => {
                chars.next();
            }
            Some('\r') => {
                chars.next();
                chars.next_if_eq(&'\n');
            }
            _ => {}
        }
    }
    out
}
