//! A named style and its per-suffix rules.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::enum_property;
use super::properties::{ChangeCallback, PropertySet};
use super::selector::{self, StyleFamily, Tag};
use super::sheet::is_builtin_selector;
use super::values::{quote, unquote};
use crate::error::{Error, Result};
use crate::util::sort_case_insensitive;

pub(crate) const PARENT_PROPERTY: &str = "-uxwrite-parent";
pub(crate) const NEXT_PROPERTY: &str = "-uxwrite-next";
pub(crate) const DISPLAY_NAME_PROPERTY: &str = "-uxwrite-display-name";
pub(crate) const DEFAULT_PROPERTY: &str = "-uxwrite-default";

pub(crate) const BEFORE_SUFFIX: &str = "::before";
pub(crate) const CELL_SUFFIX: &str = " > * > tr > td";

enum_property! {
    /// Named parts of a table style, each mapped to a structural selector
    /// suffix.
    pub enum TableComponent {
        WholeTable => "wholeTable",
        Cell => "cell",
        FirstRow => "firstRow",
        LastRow => "lastRow",
        FirstCol => "firstCol",
        LastCol => "lastCol",
        Band1Vert => "band1Vert",
        Band2Vert => "band2Vert",
        Band1Horz => "band1Horz",
        Band2Horz => "band2Horz",
        NwCell => "nwCell",
        NeCell => "neCell",
        SwCell => "swCell",
        SeCell => "seCell",
    }
}

impl TableComponent {
    /// Look up a component by its symbolic name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_css(name).ok_or_else(|| Error::UnknownTableComponent(name.to_string()))
    }

    /// The selector suffix for this component.
    pub fn suffix(self) -> &'static str {
        match self {
            TableComponent::WholeTable => "",
            TableComponent::Cell => CELL_SUFFIX,
            TableComponent::FirstRow => " > * > tr:first-of-type > td",
            TableComponent::LastRow => " > * > tr:last-of-type > td",
            TableComponent::FirstCol => " > * > tr > td:first-of-type",
            TableComponent::LastCol => " > * > tr > td:last-of-type",
            TableComponent::Band1Vert => " > * > tr:nth-of-type(odd) > td",
            TableComponent::Band2Vert => " > * > tr:nth-of-type(even) > td",
            TableComponent::Band1Horz => " > * > tr > td:nth-of-type(odd)",
            TableComponent::Band2Horz => " > * > tr > td:nth-of-type(even)",
            TableComponent::NwCell => " > * > tr:first-of-type > td:first-of-type",
            TableComponent::NeCell => " > * > tr:first-of-type > td:last-of-type",
            TableComponent::SwCell => " > * > tr:last-of-type > td:first-of-type",
            TableComponent::SeCell => " > * > tr:last-of-type > td:last-of-type",
        }
    }
}

/// Style-level change notification shared with the callbacks registered on
/// each rule.
#[derive(Default)]
struct ChangeState {
    dirty: Cell<bool>,
    callbacks: RefCell<Vec<ChangeCallback>>,
}

impl ChangeState {
    fn notify(&self) {
        if self.dirty.replace(true) {
            return;
        }
        let callbacks = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

/// A style: a base selector plus one property set per suffix.
///
/// The rule for the empty suffix (the "base rule") always exists. Rules for
/// other suffixes are created on first access.
pub struct Style {
    selector: String,
    tag: Option<Tag>,
    family: StyleFamily,
    heading_level: u8,
    base: PropertySet,
    rules: HashMap<String, PropertySet>,
    latent: bool,
    changes: Rc<ChangeState>,
}

impl Style {
    pub fn new(selector: &str) -> Self {
        let changes = Rc::new(ChangeState::default());
        let mut base = PropertySet::new();
        base.add_change_callback(Self::rule_callback(&changes));
        let mut style = Self {
            selector: String::new(),
            tag: None,
            family: StyleFamily::Unknown,
            heading_level: 0,
            base,
            rules: HashMap::new(),
            latent: false,
            changes,
        };
        style.set_selector(selector);
        style
    }

    fn rule_callback(changes: &Rc<ChangeState>) -> ChangeCallback {
        let changes = Rc::downgrade(changes);
        Rc::new(move || {
            if let Some(changes) = changes.upgrade() {
                changes.notify();
            }
        })
    }

    /// The base selector, e.g. `h1.Appendix`.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Rename the style. The element, tag, family and heading level are
    /// derived from the new selector.
    pub fn set_selector(&mut self, selector: &str) {
        self.selector = selector.to_string();
        self.tag = selector::selector_tag(selector);
        self.family = StyleFamily::from_tag(self.tag);
        self.heading_level = self.tag.map_or(0, Tag::heading_level);
    }

    pub fn element_name(&self) -> &str {
        selector::element_name(&self.selector)
    }

    pub fn class_name(&self) -> Option<&str> {
        selector::class_name(&self.selector)
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn family(&self) -> StyleFamily {
        self.family
    }

    pub fn heading_level(&self) -> u8 {
        self.heading_level
    }

    /// Latent styles exist for bookkeeping but are not written out.
    pub fn is_latent(&self) -> bool {
        self.latent
    }

    pub fn set_latent(&mut self, latent: bool) {
        self.latent = latent;
    }

    pub fn is_dirty(&self) -> bool {
        self.changes.dirty.get()
    }

    /// Clear the dirty flag of the style and all of its rules, so the next
    /// change notifies again.
    pub fn clear_dirty(&mut self) {
        self.changes.dirty.set(false);
        self.base.clear_dirty();
        for rule in self.rules.values_mut() {
            rule.clear_dirty();
        }
    }

    /// Register a callback invoked when any rule of this style first changes.
    pub fn add_change_callback(&mut self, callback: ChangeCallback) {
        self.changes.callbacks.borrow_mut().push(callback);
    }

    /// The rule for `suffix`, created empty if it does not exist yet.
    pub fn rule_for_suffix(&mut self, suffix: &str) -> &mut PropertySet {
        if suffix.is_empty() {
            return &mut self.base;
        }
        let changes = &self.changes;
        self.rules.entry(suffix.to_string()).or_insert_with(|| {
            let mut rule = PropertySet::new();
            rule.add_change_callback(Self::rule_callback(changes));
            rule
        })
    }

    /// The rule for `suffix`, without creating it.
    pub fn rule_if_present(&self, suffix: &str) -> Option<&PropertySet> {
        if suffix.is_empty() {
            Some(&self.base)
        } else {
            self.rules.get(suffix)
        }
    }

    /// The base rule, for reading.
    pub fn base_rule(&self) -> &PropertySet {
        &self.base
    }

    /// The base rule.
    pub fn rule(&mut self) -> &mut PropertySet {
        &mut self.base
    }

    /// The rule applied to every cell of a table.
    pub fn cell_rule(&mut self) -> &mut PropertySet {
        self.rule_for_suffix(CELL_SUFFIX)
    }

    /// The `::before` rule.
    pub fn before_rule(&mut self) -> &mut PropertySet {
        self.rule_for_suffix(BEFORE_SUFFIX)
    }

    /// The rule for a named table component such as `firstRow`.
    pub fn rule_for_table_component(&mut self, name: &str) -> Result<&mut PropertySet> {
        let component = TableComponent::from_name(name)?;
        Ok(self.rule_for_suffix(component.suffix()))
    }

    /// All suffixes that have a rule, including `""`.
    pub fn suffixes(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.rules.keys().cloned())
            .collect()
    }

    /// Suffixes sorted ignoring case.
    pub(crate) fn sorted_suffixes(&self) -> Vec<String> {
        let mut suffixes = self.suffixes();
        sort_case_insensitive(&mut suffixes);
        suffixes
    }

    /// Iterate over `(suffix, rule)` pairs, base rule first.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &PropertySet)> {
        std::iter::once(("", &self.base)).chain(
            self.rules
                .iter()
                .map(|(suffix, rule)| (suffix.as_str(), rule)),
        )
    }

    fn quoted_property(&self, name: &str) -> Option<String> {
        self.base.get(name).map(unquote)
    }

    fn set_quoted_property(&mut self, name: &str, value: Option<&str>) {
        let quoted = value.map(quote);
        self.base.put(name, quoted.as_deref());
    }

    /// Selector of the style this one inherits from.
    pub fn parent(&self) -> Option<String> {
        self.quoted_property(PARENT_PROPERTY)
    }

    pub fn set_parent(&mut self, parent: Option<&str>) {
        self.set_quoted_property(PARENT_PROPERTY, parent);
    }

    /// Selector of the style for the paragraph that follows this one.
    pub fn next(&self) -> Option<String> {
        self.quoted_property(NEXT_PROPERTY)
    }

    pub fn set_next(&mut self, next: Option<&str>) {
        self.set_quoted_property(NEXT_PROPERTY, next);
    }

    /// Human-readable name shown in the word processor.
    pub fn display_name(&self) -> Option<String> {
        self.quoted_property(DISPLAY_NAME_PROPERTY)
    }

    pub fn set_display_name(&mut self, name: Option<&str>) {
        self.set_quoted_property(DISPLAY_NAME_PROPERTY, name);
    }

    /// True if no rule has any property.
    pub fn is_empty(&self) -> bool {
        self.rules().all(|(_, rule)| rule.is_empty())
    }

    /// False for styles marked as a family default and for built-in
    /// selectors such as `p` or `h1`.
    pub fn is_custom(&self) -> bool {
        !self.base.is_default() && !is_builtin_selector(&self.selector)
    }

    /// True if the `::before` rule generates non-empty content.
    pub fn is_numbered(&self) -> bool {
        self.rule_if_present(BEFORE_SUFFIX)
            .and_then(|rule| rule.get("content"))
            .is_some_and(|content| content != "\"\"")
    }

    /// Fill in the browser-default weight and size for a classless heading,
    /// leaving properties that are already set.
    pub fn add_default_html_properties(&mut self) {
        if self.class_name().is_some() {
            return;
        }
        let size = match self.tag {
            Some(Tag::H1) => "24pt",
            Some(Tag::H2) => "18pt",
            Some(Tag::H3) => "14pt",
            Some(Tag::H4) => "12pt",
            Some(Tag::H5) => "10pt",
            Some(Tag::H6) => "8pt",
            _ => return,
        };
        let rule = self.rule();
        if !rule.contains("font-weight") {
            rule.set("font-weight", "bold");
        }
        if !rule.contains("font-size") {
            rule.set("font-size", size);
        }
    }

    /// Indented dump of every rule, suffixes and names sorted.
    pub fn debug_text(&self, indent: &str) -> String {
        let properties_indent = format!("{indent}    ");
        let mut out = String::new();
        for suffix in self.sorted_suffixes() {
            out.push_str(&format!("{indent}suffix {}\n", quote(&suffix)));
            if let Some(rule) = self.rule_if_present(&suffix) {
                out.push_str(&rule.debug_text(&properties_indent));
            }
        }
        out
    }
}

impl Clone for Style {
    /// Copies the selector, latent flag and rules. The copy starts clean and
    /// without change callbacks.
    fn clone(&self) -> Self {
        let mut copy = Style::new(&self.selector);
        copy.latent = self.latent;
        for (suffix, rule) in self.rules() {
            let target = copy.rule_for_suffix(suffix);
            for (name, value) in rule.iter() {
                target.set(name, value);
            }
        }
        copy.clear_dirty();
        copy
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<(&str, &PropertySet)> = self.rules().collect();
        rules.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_struct("Style")
            .field("selector", &self.selector)
            .field("latent", &self.latent)
            .field("rules", &rules)
            .finish()
    }
}
