//! Value classifiers used to sort shorthand tokens into longhands.
//!
//! Each matcher consumes a prefix of the input and returns the remainder, so
//! `is_*` checks require the whole token to be consumed.

const UNITS: &[&str] = &["em", "ex", "in", "cm", "mm", "pt", "pc", "px", "%"];

const COLOR_NAMES: &[&str] = &[
    "maroon", "red", "orange", "yellow", "olive", "purple", "fuchsia", "white", "lime", "green",
    "navy", "blue", "aqua", "teal", "black", "silver", "gray",
];

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

fn digits(s: &str) -> Option<&str> {
    let end = s
        .bytes()
        .position(|c| !c.is_ascii_digit())
        .unwrap_or(s.len());
    (end > 0).then(|| &s[end..])
}

fn number(s: &str) -> Option<&str> {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    let rest = digits(s)?;
    match rest.strip_prefix('.') {
        Some(fraction) => digits(fraction),
        None => Some(rest),
    }
}

fn unit(s: &str) -> Option<&str> {
    UNITS.iter().find_map(|u| s.strip_prefix(u))
}

fn hex_color(s: &str) -> Option<&str> {
    let s = s.strip_prefix('#')?;
    let end = s
        .bytes()
        .position(|c| !c.is_ascii_hexdigit())
        .unwrap_or(s.len());
    (end > 0).then(|| &s[end..])
}

fn rgb_color(s: &str) -> Option<&str> {
    let s = s.strip_prefix("rgb(")?;
    let s = digits(s)?.strip_prefix(',')?;
    let s = digits(s)?.strip_prefix(',')?;
    digits(s)?.strip_prefix(')')
}

fn color_name(s: &str) -> Option<&str> {
    COLOR_NAMES.iter().find_map(|name| s.strip_prefix(name))
}

/// `[+-]digits[.digits]`
pub fn is_number(s: &str) -> bool {
    number(s).is_some_and(str::is_empty)
}

/// A number followed by one of the absolute, relative or percentage units.
pub fn is_length(s: &str) -> bool {
    number(s)
        .and_then(unit)
        .is_some_and(str::is_empty)
}

/// `#hex`, `rgb(r,g,b)` with integer components, or one of the 17 basic
/// color names (lowercase).
pub fn is_color(s: &str) -> bool {
    hex_color(s)
        .or_else(|| rgb_color(s))
        .or_else(|| color_name(s))
        .is_some_and(str::is_empty)
}

pub fn is_border_style(s: &str) -> bool {
    BORDER_STYLES.iter().any(|&style| style == s)
}

pub fn is_border_width(s: &str) -> bool {
    matches!(s, "thin" | "medium" | "thick") || is_length(s)
}

pub fn is_border_color(s: &str) -> bool {
    s == "transparent" || is_color(s)
}
