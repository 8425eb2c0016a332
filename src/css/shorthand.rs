//! Shorthand expansion and collapse.
//!
//! Styles store longhands only. [`expand_properties`] rewrites the shorthands
//! the word-processor mapping understands into longhands, and
//! [`collapse_properties`] merges them back for output. Collapse merges on
//! textual equality only, so a round trip keeps the exact spelling of each
//! value.

use super::properties::PropertySet;
use super::syntax::{is_border_color, is_border_style, is_border_width};

/// Sides in shorthand order: top, right, bottom, left.
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

/// Border aspects in the order they appear in a collapsed `border` value.
const ASPECTS: [&str; 3] = ["width", "style", "color"];

const TEXT_DECORATIONS: [&str; 3] = ["underline", "overline", "line-through"];

/// Split a 1-4 value side shorthand into (top, right, bottom, left).
fn split_sides(value: &str) -> Option<[&str; 4]> {
    let tokens: Vec<&str> = value.split_ascii_whitespace().collect();
    match tokens[..] {
        [all] => Some([all, all, all, all]),
        [vertical, horizontal] => Some([vertical, horizontal, vertical, horizontal]),
        [top, horizontal, bottom] => Some([top, horizontal, bottom, horizontal]),
        [top, right, bottom, left] => Some([top, right, bottom, left]),
        _ => None,
    }
}

/// Which border aspect a shorthand token sets, if any.
fn border_aspect(token: &str) -> Option<&'static str> {
    if is_border_style(token) {
        Some("style")
    } else if is_border_width(token) {
        Some("width")
    } else if is_border_color(token) {
        Some("color")
    } else {
        None
    }
}

/// Take a property out of the set, returning its value.
fn take(props: &mut PropertySet, name: &str) -> Option<String> {
    let value = props.get(name).map(str::to_string);
    if value.is_some() {
        props.remove(name);
    }
    value
}

fn expand_text_decoration(props: &mut PropertySet) {
    let Some(value) = take(props, "text-decoration") else {
        return;
    };
    let value = value.to_ascii_lowercase();
    for token in value.split_ascii_whitespace() {
        if matches!(token, "underline" | "overline" | "line-through") {
            props.set(&format!("text-decoration-{token}"), token);
        }
    }
}

fn expand_border_side(props: &mut PropertySet, side: &str) {
    let prefix = format!("border-{side}");
    let Some(value) = take(props, &prefix) else {
        return;
    };
    for token in value.split_ascii_whitespace() {
        if let Some(aspect) = border_aspect(token) {
            props.set(&format!("{prefix}-{aspect}"), token);
        }
    }
}

fn expand_border_aspect(props: &mut PropertySet, aspect: &str) {
    let Some(value) = take(props, &format!("border-{aspect}")) else {
        return;
    };
    if let Some(values) = split_sides(&value) {
        for (side, value) in SIDES.iter().zip(values) {
            props.set(&format!("border-{side}-{aspect}"), value);
        }
    }
}

fn expand_border(props: &mut PropertySet) {
    let Some(value) = take(props, "border") else {
        return;
    };
    for token in value.split_ascii_whitespace() {
        if let Some(aspect) = border_aspect(token) {
            for side in SIDES {
                props.set(&format!("border-{side}-{aspect}"), token);
            }
        }
    }
}

fn expand_border_radius(props: &mut PropertySet) {
    if let Some(value) = take(props, "border-radius") {
        for corner in CORNERS {
            props.set(&format!("border-{corner}-radius"), &value);
        }
    }
}

fn expand_box_sides(props: &mut PropertySet, name: &str) {
    let Some(value) = take(props, name) else {
        return;
    };
    if let Some(values) = split_sides(&value) {
        for (side, value) in SIDES.iter().zip(values) {
            props.set(&format!("{name}-{side}"), value);
        }
    }
}

/// Rewrite shorthand properties into longhands, in place.
///
/// Handles `text-decoration`, the border family (`border-<side>`,
/// `border-<aspect>`, `border`, `border-radius`), `padding` and `margin`.
/// Tokens that cannot be classified are dropped, as is a side shorthand with
/// more than four values.
pub fn expand_properties(props: &mut PropertySet) {
    expand_text_decoration(props);

    for side in ["left", "right", "top", "bottom"] {
        expand_border_side(props, side);
    }
    for aspect in ["width", "color", "style"] {
        expand_border_aspect(props, aspect);
    }
    expand_border(props);
    expand_border_radius(props);

    expand_box_sides(props, "padding");
    expand_box_sides(props, "margin");
}

/// If all four longhands are present and identical, replace them with the
/// shorthand.
fn collapse_uniform(out: &mut PropertySet, shorthand: &str, longhands: &[String; 4]) {
    let values: Vec<&str> = longhands.iter().filter_map(|name| out.get(name)).collect();
    let [first, rest @ ..] = values.as_slice() else {
        return;
    };
    if values.len() != 4 || rest.iter().any(|value| value != first) {
        return;
    }
    let value = first.to_string();
    for name in longhands {
        out.remove(name);
    }
    out.set(shorthand, &value);
}

/// Merge longhands back into shorthands, returning a new set.
///
/// Text decoration flags always merge. Sides and corners merge only when all
/// four values are present and textually equal. Per-side border aspects merge
/// into `border-<side>`, and those into `border` when all four agree.
pub fn collapse_properties(expanded: &PropertySet) -> PropertySet {
    let mut out = expanded.clone();

    let decorations: Vec<&str> = TEXT_DECORATIONS
        .into_iter()
        .filter(|token| out.contains(&format!("text-decoration-{token}")))
        .collect();
    if !decorations.is_empty() {
        for token in TEXT_DECORATIONS {
            out.remove(&format!("text-decoration-{token}"));
        }
        out.set("text-decoration", &decorations.join(" "));
    }

    for name in ["margin", "padding"] {
        let longhands = SIDES.map(|side| format!("{name}-{side}"));
        collapse_uniform(&mut out, name, &longhands);
    }

    let corners = CORNERS.map(|corner| format!("border-{corner}-radius"));
    collapse_uniform(&mut out, "border-radius", &corners);

    let borders = SIDES.map(|side| {
        ASPECTS
            .iter()
            .filter_map(|aspect| expanded.get(&format!("border-{side}-{aspect}")))
            .collect::<Vec<_>>()
            .join(" ")
    });
    for side in SIDES {
        for aspect in ASPECTS {
            out.remove(&format!("border-{side}-{aspect}"));
        }
    }
    if !borders[0].is_empty() && borders.iter().all(|border| *border == borders[0]) {
        out.set("border", &borders[0]);
    } else {
        for (side, border) in SIDES.iter().zip(&borders) {
            if !border.is_empty() {
                out.set(&format!("border-{side}"), border);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parse_properties;
    use proptest::prelude::*;

    fn expand(text: &str) -> PropertySet {
        let mut props = parse_properties(text);
        expand_properties(&mut props);
        props
    }

    #[test]
    fn test_padding_one_value() {
        let props = expand("padding: 5px");
        for side in SIDES {
            assert_eq!(props.get(&format!("padding-{side}")), Some("5px"));
        }
        assert!(!props.contains("padding"));
    }

    #[test]
    fn test_padding_two_values() {
        let props = expand("padding: 1px 2px");
        assert_eq!(props.get("padding-top"), Some("1px"));
        assert_eq!(props.get("padding-bottom"), Some("1px"));
        assert_eq!(props.get("padding-left"), Some("2px"));
        assert_eq!(props.get("padding-right"), Some("2px"));
    }

    #[test]
    fn test_padding_three_values() {
        let props = expand("padding: 1px 2px 3px");
        assert_eq!(props.get("padding-top"), Some("1px"));
        assert_eq!(props.get("padding-left"), Some("2px"));
        assert_eq!(props.get("padding-right"), Some("2px"));
        assert_eq!(props.get("padding-bottom"), Some("3px"));
    }

    #[test]
    fn test_margin_four_values() {
        let props = expand("margin: 1px 2px 3px 4px");
        assert_eq!(props.get("margin-top"), Some("1px"));
        assert_eq!(props.get("margin-right"), Some("2px"));
        assert_eq!(props.get("margin-bottom"), Some("3px"));
        assert_eq!(props.get("margin-left"), Some("4px"));
    }

    #[test]
    fn test_too_many_sides_dropped() {
        let props = expand("margin: 1px 2px 3px 4px 5px");
        assert!(props.is_empty());
    }

    #[test]
    fn test_text_decoration() {
        let props = expand("text-decoration: Underline line-through blink");
        assert_eq!(props.get("text-decoration-underline"), Some("underline"));
        assert_eq!(props.get("text-decoration-line-through"), Some("line-through"));
        assert!(!props.contains("text-decoration-overline"));
        assert!(!props.contains("text-decoration"));
    }

    #[test]
    fn test_border_side_classification() {
        let props = expand("border-left: red 1pt dashed bogus");
        assert_eq!(props.get("border-left-width"), Some("1pt"));
        assert_eq!(props.get("border-left-style"), Some("dashed"));
        assert_eq!(props.get("border-left-color"), Some("red"));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn test_border_aspect_sides() {
        let props = expand("border-style: solid none");
        assert_eq!(props.get("border-top-style"), Some("solid"));
        assert_eq!(props.get("border-bottom-style"), Some("solid"));
        assert_eq!(props.get("border-left-style"), Some("none"));
        assert_eq!(props.get("border-right-style"), Some("none"));
    }

    #[test]
    fn test_border_and_radius() {
        let props = expand("border: 1px solid #000; border-radius: 4px");
        for side in SIDES {
            assert_eq!(props.get(&format!("border-{side}-width")), Some("1px"));
            assert_eq!(props.get(&format!("border-{side}-style")), Some("solid"));
            assert_eq!(props.get(&format!("border-{side}-color")), Some("#000"));
        }
        for corner in CORNERS {
            assert_eq!(props.get(&format!("border-{corner}-radius")), Some("4px"));
        }
        assert_eq!(props.len(), 16);
    }

    #[test]
    fn test_collapse_uniform_padding() {
        let collapsed = collapse_properties(&expand("padding: 5px"));
        assert_eq!(collapsed.get("padding"), Some("5px"));
        assert_eq!(collapsed.len(), 1);
    }

    #[test]
    fn test_collapse_keeps_mixed_sides() {
        let collapsed = collapse_properties(&expand("padding: 1px 2px"));
        assert!(!collapsed.contains("padding"));
        assert_eq!(collapsed.len(), 4);
    }

    #[test]
    fn test_collapse_is_textual() {
        let collapsed = collapse_properties(&expand(
            "margin-top: 0; margin-bottom: 0pt; margin-left: 0; margin-right: 0",
        ));
        assert!(!collapsed.contains("margin"));
        assert_eq!(collapsed.get("margin-bottom"), Some("0pt"));
    }

    #[test]
    fn test_collapse_does_not_mutate_input() {
        let expanded = expand("margin: 2pt");
        let _ = collapse_properties(&expanded);
        assert_eq!(expanded.len(), 4);
    }

    #[test]
    fn test_collapse_text_decoration_order() {
        let collapsed = collapse_properties(&expand("text-decoration: line-through underline"));
        assert_eq!(
            collapsed.get("text-decoration"),
            Some("underline line-through")
        );
    }

    #[test]
    fn test_collapse_border() {
        let collapsed = collapse_properties(&expand("border: solid red 1px"));
        assert_eq!(collapsed.get("border"), Some("1px solid red"));
        assert_eq!(collapsed.len(), 1);
    }

    #[test]
    fn test_collapse_border_sides() {
        let collapsed =
            collapse_properties(&expand("border-top: 1px solid; border-bottom: 2px solid"));
        assert_eq!(collapsed.get("border-top"), Some("1px solid"));
        assert_eq!(collapsed.get("border-bottom"), Some("2px solid"));
        assert!(!collapsed.contains("border"));
        assert!(!collapsed.contains("border-left"));
        assert_eq!(collapsed.len(), 2);
    }

    #[test]
    fn test_expand_collapse_round_trip() {
        let original = expand("margin: 3pt; border: 1px solid red; text-decoration: underline");
        let mut again = collapse_properties(&original);
        expand_properties(&mut again);
        assert_eq!(again, original);
    }

    /// Longhand name for one side of a side shorthand.
    fn side_longhand(shorthand: &str, side: &str) -> String {
        match shorthand {
            "border-width" => format!("border-{side}-width"),
            _ => format!("{shorthand}-{side}"),
        }
    }

    fn length() -> impl Strategy<Value = String> {
        (0u32..40, prop::sample::select(vec!["pt", "px", "em", "%"]))
            .prop_map(|(n, unit)| format!("{n}{unit}"))
    }

    proptest! {
        #[test]
        fn prop_side_shorthands(
            shorthand in prop::sample::select(vec!["padding", "margin", "border-width"]),
            values in prop::collection::vec(length(), 1..=4),
        ) {
            let expanded = expand(&format!("{shorthand}: {}", values.join(" ")));

            let v: Vec<&str> = values.iter().map(String::as_str).collect();
            let sides = match v[..] {
                [all] => [all, all, all, all],
                [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
                [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
                [top, right, bottom, left] => [top, right, bottom, left],
                _ => unreachable!(),
            };
            prop_assert_eq!(expanded.len(), 4);
            for (side, value) in SIDES.iter().zip(sides) {
                prop_assert_eq!(expanded.get(&side_longhand(shorthand, side)), Some(value));
            }

            let collapsed = collapse_properties(&expanded);
            if sides.iter().all(|value| *value == sides[0]) {
                let name = if shorthand == "border-width" { "border" } else { shorthand };
                prop_assert_eq!(collapsed.len(), 1);
                prop_assert_eq!(collapsed.get(name), Some(sides[0]));
            } else if shorthand == "border-width" {
                prop_assert_eq!(collapsed.len(), 4);
                for (side, value) in SIDES.iter().zip(sides) {
                    prop_assert_eq!(collapsed.get(&format!("border-{side}")), Some(value));
                }
            } else {
                prop_assert_eq!(&collapsed, &expanded);
            }

            let mut again = collapsed;
            expand_properties(&mut again);
            prop_assert_eq!(again, expanded);
        }
    }
}
