//! Text helpers shared by the stylesheet code.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Decode stylesheet bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the `@charset "..."` declaration at the start of the file
/// 3. Falls back to Windows-1252 (common in stylesheets saved by older word processors)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = charset_hint(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the label from a leading `@charset "label";` rule.
fn charset_hint(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(b"@charset \"")?;
    let end = memchr::memchr(b'"', rest)?;
    std::str::from_utf8(&rest[..end]).ok().map(str::to_string)
}

/// Drop a leading `@charset "label";` rule from decoded stylesheet text.
pub(crate) fn strip_charset_rule(text: &str) -> &str {
    text.strip_prefix("@charset \"")
        .and_then(|rest| rest.find("\";").map(|end| &rest[end + 2..]))
        .unwrap_or(text)
}

/// Compare two strings ignoring ASCII case.
///
/// Strings that differ only in case are ordered bytewise so that sorting is
/// total and deterministic.
pub fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}

/// Sort strings ignoring ASCII case.
pub fn sort_case_insensitive<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| cmp_case_insensitive(a.as_ref(), b.as_ref()));
}

/// Trim the whitespace characters CSS cares about from both ends.
pub(crate) fn trim_css_whitespace(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Collapse runs of whitespace to single spaces and trim both ends.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("p { color: red; }".as_bytes()), "p { color: red; }");
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFp { }";
        assert_eq!(decode_text(bytes), "p { }");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0xE9 is 'é' in CP1252 and invalid as standalone UTF-8
        let bytes = b"p.Caf\xE9 { }";
        assert_eq!(decode_text(bytes), "p.Café { }");
    }

    #[test]
    fn test_decode_uses_charset_hint() {
        let bytes = b"@charset \"iso-8859-2\"; p.\xB1 { }";
        assert!(decode_text(bytes).contains("p.ą"));
    }

    #[test]
    fn test_strip_charset_rule() {
        assert_eq!(strip_charset_rule("@charset \"utf-8\";\np { }"), "\np { }");
        assert_eq!(strip_charset_rule("p { }"), "p { }");
        assert_eq!(strip_charset_rule("@charset \"utf-8\" p { }"), "@charset \"utf-8\" p { }");
    }

    #[test]
    fn test_case_insensitive_sort() {
        let mut names = vec!["b", "A", "a", "C"];
        sort_case_insensitive(&mut names);
        assert_eq!(names, vec!["A", "a", "b", "C"]);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  A4 \t  portrait\n"), "A4 portrait");
    }
}
