//! Conversion settings read from the `configuration` layer group.
//!
//! Each child layer of the group is named `key="value"`. Absent keys are
//! simply absent; callers get an `Option` back and decide for themselves.

use std::collections::BTreeMap;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Result, StrataError};
use crate::layer::Layer;

/// Name of the top-level group holding configuration entries.
pub const CONFIGURATION_GROUP: &str = "configuration";

/// Key for the markup annotation template (`before|after`).
pub const COMMENT_TEMPLATE: &str = "comment-template";

/// Key for the document title.
pub const TITLE: &str = "title";

/// Flat key/value conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    options: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Read every entry of a configuration group.
    ///
    /// Entries that don't follow `key="value"` are reported and skipped.
    pub fn from_group(group: &dyn Layer, diagnostics: &mut Diagnostics) -> Self {
        let mut config = Self::new();

        for index in 0..group.child_count() {
            let Some(entry) = group.child(index) else {
                continue;
            };
            match parse_entry(entry.name()) {
                Ok((key, value)) => {
                    log::debug!("configuration: {} = {:?}", key, value);
                    config.set(key, value);
                }
                Err(e) => diagnostics.push(
                    Diagnostic::warning("strata::config", e.to_string()).on_layer(entry.name()),
                ),
            }
        }

        config
    }
}

/// Split one `key="value"` entry.
pub fn parse_entry(entry: &str) -> Result<(String, String)> {
    let malformed = || StrataError::Parse {
        message: format!("malformed configuration entry '{}'", entry),
        help: Some("Configuration layers are named key=\"value\"".to_string()),
    };

    let (key, value) = entry.split_once('=').ok_or_else(malformed)?;
    let key = key.trim();
    let value = value
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(malformed)?;

    if key.is_empty() {
        return Err(malformed());
    }

    Ok((key.to_string(), value.to_string()))
}
