//! Style rules attached to elements.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// One selector and its properties.
///
/// Properties written with [`StyleRule::set_manual`] are pinned: inferred
/// layout written through [`StyleRule::infer`] never replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRule {
    selector: String,
    properties: BTreeMap<String, String>,
    manual: BTreeSet<String>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: BTreeMap::new(),
            manual: BTreeSet::new(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn set_selector(&mut self, selector: impl Into<String>) {
        self.selector = selector.into();
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Set a property from hand-written metadata and pin it.
    pub fn set_manual(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        self.manual.insert(property.clone());
        self.properties.insert(property, value.into());
    }

    /// Set an inferred property unless metadata pinned it.
    ///
    /// Returns whether the value was written.
    pub fn infer(&mut self, property: &str, value: impl Into<String>) -> bool {
        if self.manual.contains(property) {
            log::trace!("{}: keeping manual {}", self.selector, property);
            return false;
        }
        self.properties.insert(property.to_string(), value.into());
        true
    }

    /// Whether `property` was set from metadata.
    pub fn is_manual(&self, property: &str) -> bool {
        self.manual.contains(property)
    }

    /// Empty the rule, returning the pinned properties it held.
    pub fn take_manual(&mut self) -> Vec<(String, String)> {
        let manual = std::mem::take(&mut self.manual);
        let mut properties = std::mem::take(&mut self.properties);
        manual
            .into_iter()
            .filter_map(|key| properties.remove_entry(&key))
            .collect()
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Render the rule for an embedded stylesheet.
    ///
    /// Rules without a selector or without properties render as nothing.
    pub fn to_css(&self) -> String {
        if self.selector.is_empty() || self.properties.is_empty() {
            return String::new();
        }

        let mut css = format!("\t{} {{\n", self.selector);
        for (key, value) in &self.properties {
            let _ = writeln!(css, "\t\t{}: {};", key, value);
        }
        css.push_str("\t}\n\n");
        css
    }
}

/// Format a pixel length.
pub fn px(value: i64) -> String {
    format!("{}px", value)
}

/// Read back a pixel length written by [`px`].
pub fn parse_px(value: &str) -> Option<i64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}
