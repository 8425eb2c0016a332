//! Property sets: the name/value pairs of a single CSS rule.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::rc::Rc;

use super::parser::parse_properties;
use super::shorthand::{collapse_properties, expand_properties};
use crate::util::sort_case_insensitive;

/// Callback invoked when a property set (or style) first becomes dirty.
pub type ChangeCallback = Rc<dyn Fn()>;

/// Property name prefixes that are never written by [`PropertySet::serialize`].
const PRIVATE_PREFIXES: [&str; 2] = ["-word", "-odf"];

/// A mapping from CSS property name to value.
///
/// Names are compared byte-for-byte. A property that is present always has a
/// value; setting a value of `None` removes the entry.
///
/// The set tracks a dirty flag. The first mutation after the flag was cleared
/// sets it and invokes the registered change callbacks; further mutations do
/// not notify again until [`clear_dirty`](Self::clear_dirty) is called.
#[derive(Default)]
pub struct PropertySet {
    values: HashMap<String, String>,
    dirty: bool,
    callbacks: Vec<ChangeCallback>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property set from raw (possibly shorthand) properties,
    /// expanding them first.
    pub fn from_raw(mut raw: PropertySet) -> Self {
        expand_properties(&mut raw);
        raw.dirty = false;
        raw.callbacks.clear();
        raw
    }

    /// Parse `name: value; ...` text and expand the result.
    pub fn parse(text: &str) -> Self {
        Self::from_raw(parse_properties(text))
    }

    /// Copy this set and apply the parsed, expanded properties of `text` on top.
    pub fn with_extra(&self, text: &str) -> Self {
        let extra = Self::parse(text);
        let mut result = self.clone();
        for (name, value) in extra.values {
            result.values.insert(name, value);
        }
        result
    }

    /// Replace every property with the expansion of `raw`.
    pub fn update_from_raw(&mut self, raw: &PropertySet) {
        let mut expanded = raw.clone();
        expand_properties(&mut expanded);
        if self.values != expanded.values {
            self.values = expanded.values;
            self.mark_dirty();
        }
    }

    /// Get the value of a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Check whether a property is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set a property, or remove it when `value` is `None`.
    pub fn put(&mut self, name: &str, value: Option<&str>) {
        let changed = match value {
            Some(value) => match self.values.get_mut(name) {
                Some(existing) if existing == value => false,
                Some(existing) => {
                    value.clone_into(existing);
                    true
                }
                None => {
                    self.values.insert(name.to_string(), value.to_string());
                    true
                }
            },
            None => self.values.remove(name).is_some(),
        };
        if changed {
            self.mark_dirty();
        }
    }

    /// Set a property.
    pub fn set(&mut self, name: &str, value: &str) {
        self.put(name, Some(value));
    }

    /// Remove a property.
    pub fn remove(&mut self, name: &str) {
        self.put(name, None);
    }

    /// Snapshot of all property names, independent of later changes.
    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Iterate over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as `name: value; name: value`.
    ///
    /// Names are sorted case-insensitively and `-word*`/`-odf*` names are
    /// skipped, so equal sets always produce identical text. Callers rely on
    /// this to use the output as a key when deduplicating anonymous styles.
    pub fn serialize(&self) -> String {
        let mut names: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|name| !PRIVATE_PREFIXES.iter().any(|p| name.starts_with(p)))
            .collect();
        sort_case_insensitive(&mut names);
        names
            .iter()
            .map(|name| format!("{}: {}", name, self.values[*name]))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Collapsed, serialized form suitable for an HTML `style` attribute.
    pub fn description(&self) -> String {
        collapse_properties(self).serialize()
    }

    /// Sorted `name = value` listing, one property per line.
    pub fn debug_text(&self, indent: &str) -> String {
        let mut names = self.names();
        sort_case_insensitive(&mut names);
        let mut out = String::new();
        for name in &names {
            out.push_str(indent);
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&self.values[name]);
            out.push('\n');
        }
        out
    }

    // Dirty tracking

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Register a callback fired on the first change after the set was clean.
    pub fn add_change_callback(&mut self, callback: ChangeCallback) {
        self.callbacks.push(callback);
    }

    fn mark_dirty(&mut self) {
        if self.dirty {
            return;
        }
        self.dirty = true;
        for callback in &self.callbacks {
            callback();
        }
    }

    // Common formatting flags

    pub fn bold(&self) -> bool {
        self.get("font-weight") == Some("bold")
    }

    pub fn set_bold(&mut self, on: bool) {
        self.put("font-weight", on.then_some("bold"));
    }

    pub fn italic(&self) -> bool {
        self.get("font-style") == Some("italic")
    }

    pub fn set_italic(&mut self, on: bool) {
        self.put("font-style", on.then_some("italic"));
    }

    pub fn underline(&self) -> bool {
        self.contains("text-decoration-underline")
    }

    pub fn set_underline(&mut self, on: bool) {
        self.put("text-decoration-underline", on.then_some("underline"));
    }

    pub fn line_through(&self) -> bool {
        self.contains("text-decoration-line-through")
    }

    pub fn set_line_through(&mut self, on: bool) {
        self.put("text-decoration-line-through", on.then_some("line-through"));
    }

    pub fn overline(&self) -> bool {
        self.contains("text-decoration-overline")
    }

    pub fn set_overline(&mut self, on: bool) {
        self.put("text-decoration-overline", on.then_some("overline"));
    }

    /// Whether this rule marks its style as the default for its family.
    pub fn is_default(&self) -> bool {
        self.get("-uxwrite-default") == Some("true")
    }

    pub fn set_default(&mut self, on: bool) {
        self.put("-uxwrite-default", on.then_some("true"));
    }
}

/// Clones carry the values only; the copy starts clean with no callbacks.
impl Clone for PropertySet {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            dirty: false,
            callbacks: Vec::new(),
        }
    }
}

impl PartialEq for PropertySet {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for PropertySet {}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        sort_case_insensitive(&mut names);
        f.debug_map()
            .entries(names.into_iter().map(|name| (name, &self.values[name])))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            dirty: false,
            callbacks: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
