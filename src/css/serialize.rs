//! Stylesheet text output.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::properties::PropertySet;
use crate::util::{cmp_case_insensitive, sort_case_insensitive};

/// Body of a rule: one `    name: value;` line per property, names sorted
/// ignoring case.
fn rule_body(properties: &PropertySet) -> String {
    let mut names = properties.names();
    sort_case_insensitive(&mut names);
    let mut body = String::new();
    for name in &names {
        if let Some(value) = properties.get(name) {
            let _ = writeln!(body, "    {name}: {value};");
        }
    }
    body
}

/// Render a `selector -> properties` mapping as stylesheet text.
///
/// Selectors whose rules render identically share a single rule with a
/// comma-separated selector list. Selector lists and rules are sorted
/// ignoring case, and rules are separated by a blank line:
///
/// ```text
/// h1, h2 {
///     font-weight: bold;
/// }
///
/// p {
///     margin: 0pt;
/// }
/// ```
pub fn stylesheet_text_from_rules<'a, I, S>(rules: I) -> String
where
    I: IntoIterator<Item = (S, &'a PropertySet)>,
    S: AsRef<str>,
{
    let mut by_body: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (selector, properties) in rules {
        by_body
            .entry(rule_body(properties))
            .or_default()
            .push(selector.as_ref().to_string());
    }

    let mut combined: Vec<(String, String)> = by_body
        .into_iter()
        .map(|(body, mut selectors)| {
            sort_case_insensitive(&mut selectors);
            (selectors.join(", "), body)
        })
        .collect();
    combined.sort_by(|a, b| cmp_case_insensitive(&a.0, &b.0));

    let mut out = String::new();
    for (i, (selectors, body)) in combined.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{selectors} {{\n{body}}}\n");
    }
    out
}
