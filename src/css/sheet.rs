//! The stylesheet: styles keyed by base selector, and the cascade over them.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

use super::content::{ContentPart, ContentPartKind, content_text, parse_content};
use super::ident::{ends_with_hex_escape, escape_ident};
use super::parser::{parse_rules, parse_selectors, try_parse_properties};
use super::properties::PropertySet;
use super::selector::{
    StyleFamily, Tag, class_name, element_name, has_class_name, make_selector, parse_selector,
};
use super::serialize::stylesheet_text_from_rules;
use super::shorthand::collapse_properties;
use super::style::{BEFORE_SUFFIX, CELL_SUFFIX, DEFAULT_PROPERTY, Style};
use super::values::quote;
use crate::util::{cmp_case_insensitive, decode_text, strip_charset_rule};

/// How [`Stylesheet::lookup_selector`] treats a selector with no style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Only return a style that already exists.
    Existing,
    /// Create the style if needed. An existing latent style is activated.
    Add,
    /// Create the style as latent if needed. Existing styles are left alone.
    AddLatent,
}

/// True for selectors the document model always knows about: the classless
/// block elements, `@page`, and the generated table-of-contents and
/// list-of-figures/tables containers.
pub fn is_builtin_selector(selector: &str) -> bool {
    let element = element_name(selector);
    if element == "@page" {
        return true;
    }
    match (Tag::from_css(element), class_name(selector)) {
        (
            Some(
                Tag::P
                | Tag::H1
                | Tag::H2
                | Tag::H3
                | Tag::H4
                | Tag::H5
                | Tag::H6
                | Tag::Blockquote
                | Tag::Pre
                | Tag::Body
                | Tag::Figure
                | Tag::Figcaption
                | Tag::Table
                | Tag::Caption,
            ),
            None,
        ) => true,
        (Some(Tag::Nav), Some(class)) => {
            matches!(class, "tableofcontents" | "listoffigures" | "listoftables")
        }
        _ => false,
    }
}

/// A set of styles keyed by base selector, plus the default style of each
/// family.
///
/// Styles refer to their parents by selector (the `-uxwrite-parent`
/// property), so inheritance is resolved through the sheet rather than by
/// holding references between styles.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    styles: BTreeMap<String, Style>,
    defaults: HashMap<StyleFamily, String>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stylesheet from CSS text.
    pub fn from_css_text(text: &str) -> Self {
        let mut sheet = Self::new();
        sheet.update_from_css_text(text);
        sheet
    }

    /// Build a stylesheet from the raw bytes of a `.css` file, honouring a
    /// byte order mark or a leading `@charset` rule.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_css_text(strip_charset_rule(&decode_text(bytes)))
    }

    /// All base selectors, sorted.
    pub fn selectors(&self) -> Vec<String> {
        self.styles.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.styles.contains_key(selector)
    }

    pub fn get(&self, selector: &str) -> Option<&Style> {
        self.styles.get(selector)
    }

    pub fn get_mut(&mut self, selector: &str) -> Option<&mut Style> {
        self.styles.get_mut(selector)
    }

    /// Iterate over all styles in selector order.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    /// Insert a style under its own selector, returning any style it replaced.
    pub fn add_style(&mut self, style: Style) -> Option<Style> {
        self.styles.insert(style.selector().to_string(), style)
    }

    /// Remove a style. A family default that pointed at it is cleared.
    pub fn remove_style(&mut self, selector: &str) -> Option<Style> {
        let removed = self.styles.remove(selector)?;
        self.defaults.retain(|_, default| default != selector);
        Some(removed)
    }

    /// Move the style at `old` to `new`, renaming it.
    ///
    /// Family defaults follow the style. Returns false if there is no style
    /// at `old` or `new` is already taken.
    pub fn relocate(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.styles.contains_key(old);
        }
        if self.styles.contains_key(new) {
            return false;
        }
        let Some(mut style) = self.styles.remove(old) else {
            return false;
        };
        style.set_selector(new);
        self.styles.insert(new.to_string(), style);
        for default in self.defaults.values_mut() {
            if default == old {
                *default = new.to_string();
            }
        }
        true
    }

    fn entry(&mut self, selector: &str, latent: bool) -> &mut Style {
        let style = self.styles.entry(selector.to_string()).or_insert_with(|| {
            let mut style = Style::new(selector);
            style.set_latent(latent);
            style
        });
        if !latent {
            style.set_latent(false);
        }
        style
    }

    /// Look up the style for a base selector, creating it if `lookup` asks
    /// for that.
    pub fn lookup_selector(&mut self, selector: &str, lookup: Lookup) -> Option<&mut Style> {
        match lookup {
            Lookup::Existing => self.styles.get_mut(selector),
            Lookup::Add => Some(self.entry(selector, false)),
            Lookup::AddLatent => Some(self.entry(selector, true)),
        }
    }

    /// [`lookup_selector`](Self::lookup_selector) for `element` or
    /// `element.class`.
    pub fn lookup_element(
        &mut self,
        element: &str,
        class: Option<&str>,
        lookup: Lookup,
    ) -> Option<&mut Style> {
        self.lookup_selector(&make_selector(element, class), lookup)
    }

    /// The style named by `style`'s parent property, if it exists.
    pub fn parent_of(&self, style: &Style) -> Option<&Style> {
        style.parent().and_then(|parent| self.styles.get(&parent))
    }

    /// The declared parent, or for a classed style the classless style of the
    /// same element.
    pub fn parent_of_style(&self, style: &Style) -> Option<&Style> {
        if let Some(parent) = self.parent_of(style) {
            return Some(parent);
        }
        if has_class_name(style.selector()) {
            return self.styles.get(style.element_name());
        }
        None
    }

    /// Resolve `orig` against its ancestors.
    ///
    /// The result has every suffix found anywhere on the parent chain. Each
    /// property comes from the nearest style that sets it, starting with
    /// `orig` itself. The family-default marker is only taken from `orig`.
    /// The walk stops at a missing parent or at a selector it has already
    /// visited.
    pub fn flattened_style(&self, orig: &Style) -> Style {
        let mut result = Style::new(orig.selector());
        result.set_latent(orig.is_latent());

        let mut visited: HashSet<&str> = HashSet::new();
        let mut ancestor = Some(orig);
        while let Some(style) = ancestor {
            if !visited.insert(style.selector()) {
                break;
            }
            let is_orig = visited.len() == 1;
            for (suffix, rule) in style.rules() {
                let target = result.rule_for_suffix(suffix);
                for (name, value) in rule.iter() {
                    if name == DEFAULT_PROPERTY && !is_orig {
                        continue;
                    }
                    if !target.contains(name) {
                        target.set(name, value);
                    }
                }
            }
            ancestor = self.parent_of(style);
        }

        result.clear_dirty();
        result
    }

    /// Full selector to collapsed properties, for every style that is not
    /// latent.
    ///
    /// Class names are escaped in the full selector. An empty rule is left
    /// out when it belongs to a suffix or to a built-in selector.
    pub fn rules(&self) -> BTreeMap<String, PropertySet> {
        let mut result = BTreeMap::new();
        for style in self.styles.values().filter(|style| !style.is_latent()) {
            let selector = style.selector();
            let escaped = class_name(selector).map(escape_ident);
            let base = make_selector(element_name(selector), escaped.as_deref());
            let separated = escaped.as_deref().is_some_and(ends_with_hex_escape);
            let builtin = is_builtin_selector(selector);

            let flattened = self.flattened_style(style);
            for (suffix, rule) in flattened.rules() {
                let collapsed = collapse_properties(rule);
                if collapsed.is_empty() && (!suffix.is_empty() || builtin) {
                    continue;
                }
                // The space after a trailing hex escape belongs to the escape.
                let full = if separated && suffix.starts_with(char::is_whitespace) {
                    format!("{base} {suffix}")
                } else {
                    format!("{base}{suffix}")
                };
                result.insert(full, collapsed);
            }
        }
        result
    }

    /// The stylesheet as CSS text.
    pub fn css_text(&self) -> String {
        stylesheet_text_from_rules(&self.rules())
    }

    /// Unflattened dump of every style: selector, quoted suffixes and raw
    /// `name = value` lines, all sorted.
    pub fn debug_text(&self) -> String {
        let mut selectors: Vec<&String> = self.styles.keys().collect();
        selectors.sort_by(|a, b| cmp_case_insensitive(a, b));

        let mut out = String::new();
        for selector in selectors {
            let Some(style) = self.styles.get(selector) else {
                continue;
            };
            let _ = writeln!(out, "{}", style.selector());
            for suffix in style.sorted_suffixes() {
                let _ = writeln!(out, "    {}", quote(&suffix));
                if let Some(rule) = style.rule_if_present(&suffix) {
                    out.push_str(&rule.debug_text("        "));
                }
            }
        }
        out
    }

    /// Replace the whole sheet with the styles described by `text`.
    ///
    /// A rule group whose selector list or body cannot be parsed is skipped.
    /// When the same selector appears in several groups, the last one wins.
    /// A bare `.Class` selector means `p.Class`. Shorthands are expanded, a
    /// `-uxwrite-default: true` marker registers the style as its family's
    /// default, and properties that merely repeat the parent's value are
    /// removed.
    pub fn update_from_css_text(&mut self, text: &str) {
        self.styles.clear();
        self.defaults.clear();

        let groups = parse_rules(text);
        let group_count = groups.len();
        let mut by_selector: HashMap<String, PropertySet> = HashMap::new();
        for (selectors, body) in groups {
            let Some(selectors) = parse_selectors(&selectors) else {
                tracing::warn!("skipping rule with malformed selector list: {}", selectors);
                continue;
            };
            let Some(properties) = try_parse_properties(&body) else {
                tracing::warn!("skipping rule with malformed body: {}", selectors.join(", "));
                continue;
            };
            for selector in selectors {
                by_selector.insert(selector, properties.iter().cloned().collect());
            }
        }

        let mut raw_rules: Vec<(String, PropertySet)> = by_selector.into_iter().collect();
        raw_rules.sort_by(|a, b| cmp_case_insensitive(&a.0, &b.0));

        for (selector, raw) in raw_rules {
            let selector = if selector.starts_with('.') {
                format!("p{selector}")
            } else {
                selector
            };
            let (base, suffix) = parse_selector(&selector);
            let expanded = PropertySet::from_raw(raw);

            let style = self.entry(&base, false);
            let rule = style.rule_for_suffix(&suffix);
            for (name, value) in expanded.iter() {
                rule.set(name, value);
            }

            let is_default = suffix.is_empty()
                && expanded
                    .get(DEFAULT_PROPERTY)
                    .is_some_and(|value| value.eq_ignore_ascii_case("true"));
            if is_default {
                let family = style.family();
                self.defaults.insert(family, base);
            }
        }

        self.remove_redundant_properties();
        tracing::debug!(
            "loaded {} styles from {} rule groups",
            self.styles.len(),
            group_count
        );
    }

    /// Clear parent links until no parent chain loops back on itself.
    ///
    /// Each loop is cut at its lexicographically greatest selector.
    pub fn break_cycles(&mut self) {
        let selectors = self.selectors();
        for start in &selectors {
            let mut path: Vec<String> = Vec::new();
            let mut current = Some(start.clone());
            while let Some(selector) = current {
                if let Some(pos) = path.iter().position(|s| *s == selector) {
                    let cut = path[pos..].iter().max().cloned();
                    if let Some(cut) = cut
                        && let Some(style) = self.styles.get_mut(&cut)
                    {
                        tracing::debug!("breaking parent cycle at {}", cut);
                        style.set_parent(None);
                    }
                    break;
                }
                current = self.styles.get(&selector).and_then(Style::parent);
                path.push(selector);
            }
        }
    }

    /// Number of existing ancestors of `selector`, following declared parents
    /// and stopping at the first repeat.
    fn depth(&self, selector: &str) -> usize {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut depth = 0;
        let mut current = self.styles.get(selector);
        while let Some(style) = current {
            if !visited.insert(style.selector()) {
                break;
            }
            current = self.parent_of(style);
            if current.is_some() {
                depth += 1;
            }
        }
        depth
    }

    /// All selectors, styles with the most ancestors first. Selectors of
    /// equal depth are in sorted order.
    pub fn reverse_topological_selectors(&self) -> Vec<String> {
        let mut ranked: Vec<(usize, &String)> = self
            .styles
            .keys()
            .map(|selector| (self.depth(selector), selector))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        ranked.into_iter().map(|(_, selector)| selector.clone()).collect()
    }

    /// Drop child properties whose value is textually equal to the parent's
    /// value for the same suffix and name.
    ///
    /// Cell padding is never dropped: table styles do not inherit it.
    pub fn remove_redundant_properties(&mut self) {
        self.break_cycles();

        let mut removed = 0;
        for selector in self.reverse_topological_selectors() {
            let Some(child) = self.styles.get(&selector) else {
                continue;
            };
            let Some(parent) = self.parent_of(child) else {
                continue;
            };

            let mut redundant: Vec<(String, String)> = Vec::new();
            for (suffix, child_rule) in child.rules() {
                let Some(parent_rule) = parent.rule_if_present(suffix) else {
                    continue;
                };
                for (name, value) in child_rule.iter() {
                    if suffix == CELL_SUFFIX && name.starts_with("padding-") {
                        continue;
                    }
                    if parent_rule.get(name) == Some(value) {
                        redundant.push((suffix.to_string(), name.to_string()));
                    }
                }
            }

            if redundant.is_empty() {
                continue;
            }
            if let Some(child) = self.styles.get_mut(&selector) {
                for (suffix, name) in &redundant {
                    tracing::trace!("{}{}: dropping inherited {}", selector, suffix, name);
                    child.rule_for_suffix(suffix).remove(name);
                }
            }
            removed += redundant.len();
        }

        if removed > 0 {
            tracing::debug!("removed {} inherited properties", removed);
        }
    }

    /// The style registered as the default for `family`.
    pub fn default_style_for_family(&self, family: StyleFamily) -> Option<&Style> {
        self.defaults
            .get(&family)
            .and_then(|selector| self.styles.get(selector))
    }

    /// Register the style at `selector` as the default for `family`, or clear
    /// the registration with `None`.
    pub fn set_default_style(&mut self, selector: Option<&str>, family: StyleFamily) {
        match selector {
            Some(selector) => {
                self.defaults.insert(family, selector.to_string());
            }
            None => {
                self.defaults.remove(&family);
            }
        }
    }

    /// True if any heading style generates a counter in its `::before`
    /// content.
    pub fn heading_numbering(&self) -> bool {
        self.styles
            .values()
            .filter(|style| style.heading_level() > 0)
            .filter_map(|style| style.rule_if_present(BEFORE_SUFFIX)?.get("content"))
            .any(|content| {
                parse_content(content)
                    .iter()
                    .any(|part| part.kind == ContentPartKind::Counter)
            })
    }

    /// Turn automatic heading numbers on or off.
    ///
    /// When enabling, each level gets numbering on its classless style
    /// (created if the level has no styles at all). If a level only has
    /// classed styles, those without a parent or based on the default
    /// paragraph style are numbered and the rest are explicitly unnumbered.
    /// Disabling strips the numbering properties from every heading style.
    pub fn set_heading_numbering(&mut self, enabled: bool) {
        if !enabled {
            for style in self.styles.values_mut() {
                if style.heading_level() > 0 {
                    disable_numbering(style, false);
                }
            }
            return;
        }

        let default_paragraph = self.defaults.get(&StyleFamily::Paragraph).cloned();
        for level in 1..=6u8 {
            let Some(tag) = Tag::heading(level) else {
                continue;
            };
            let at_level: Vec<String> = self
                .styles
                .values()
                .filter(|style| style.heading_level() == level)
                .map(|style| style.selector().to_string())
                .collect();

            if at_level.is_empty() || at_level.iter().any(|s| !has_class_name(s)) {
                enable_numbering(self.entry(tag.as_str(), false));
                continue;
            }

            for selector in &at_level {
                let Some(style) = self.styles.get_mut(selector) else {
                    continue;
                };
                let parent = style.parent();
                if parent.is_none() || parent == default_paragraph {
                    enable_numbering(style);
                } else {
                    disable_numbering(style, true);
                }
            }
        }
    }

    /// True if the `body` style resets any counters.
    pub fn is_numbering_used(&self) -> bool {
        self.styles
            .get("body")
            .is_some_and(|style| style.base_rule().contains("counter-reset"))
    }

    /// The `@page` rule, created if needed.
    pub fn page_properties(&mut self) -> &mut PropertySet {
        self.entry(Tag::Page.as_str(), false).rule()
    }

    /// The `body` rule, created if needed.
    pub fn body_properties(&mut self) -> &mut PropertySet {
        self.entry(Tag::Body.as_str(), false).rule()
    }
}

fn enable_numbering(style: &mut Style) {
    let level = style.heading_level();
    let element = style.element_name().to_string();

    let reset = ((level + 1)..=6)
        .map(|after| format!("h{after}"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut parts = Vec::new();
    for upto in 1..=level {
        if upto > 1 {
            parts.push(ContentPart::string("."));
        }
        parts.push(ContentPart::counter(format!("h{upto}")));
    }
    parts.push(ContentPart::string(" "));

    let rule = style.rule();
    rule.set("counter-increment", &element);
    if !reset.is_empty() {
        rule.set("counter-reset", &reset);
    }
    style.before_rule().set("content", &content_text(&parts));
    style.set_latent(false);
}

fn disable_numbering(style: &mut Style, explicitly: bool) {
    if explicitly {
        let increment = format!("h{} 0", style.heading_level());
        let rule = style.rule();
        rule.set("counter-increment", &increment);
        rule.set("counter-reset", "none");
        style.before_rule().set("content", "\"\"");
        style.set_latent(false);
    } else {
        let rule = style.rule();
        rule.remove("counter-increment");
        rule.remove("counter-reset");
        if style.rule_if_present(BEFORE_SUFFIX).is_some() {
            style.before_rule().remove("content");
        }
    }
}
