//! Namespaced layer-name attributes.
//!
//! Attribute entries in a layer name are keyed `namespace:key`, for example
//! `attr:class="hero"` or `css:color="red"`. The namespace picks a
//! [`MetadataHandler`] from the [`MetadataRegistry`]; the handler then
//! applies `key`/`value` to the element being built.
//!
//! Metadata is applied while the element is constructed, before any layout
//! is inferred. `css:` properties are pinned on the rule and inferred layout
//! skips pinned properties, so a `css:` entry always wins.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::element::Element;
use crate::error::{Result, StrataError};

/// Applies one namespace's entries to an element.
pub trait MetadataHandler {
    fn apply(&self, element: &mut Element<'_>, key: &str, value: &str) -> Result<()>;
}

/// `attr:`: a literal HTML attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeHandler;

impl MetadataHandler for AttributeHandler {
    fn apply(&self, element: &mut Element<'_>, key: &str, value: &str) -> Result<()> {
        element.set_attribute(key, value);
        Ok(())
    }
}

/// `css:`: a pinned style property on the element's rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssHandler;

impl MetadataHandler for CssHandler {
    fn apply(&self, element: &mut Element<'_>, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StrataError::Metadata {
                message: "css: entry has no property name".to_string(),
            });
        }
        element.style_mut().set_manual(key, value);
        Ok(())
    }
}

/// Maps namespace tokens to handlers.
#[derive(Default)]
pub struct MetadataRegistry {
    handlers: HashMap<String, Box<dyn MetadataHandler>>,
}

impl MetadataRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the `attr` and `css` namespaces.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("attr", AttributeHandler)
            .register("css", CssHandler);
        registry
    }

    /// Register a handler, replacing any existing handler for `namespace`.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        handler: impl MetadataHandler + 'static,
    ) -> &mut Self {
        self.handlers.insert(namespace.into(), Box::new(handler));
        self
    }

    pub fn get(&self, namespace: &str) -> Option<&dyn MetadataHandler> {
        self.handlers.get(namespace).map(|h| h.as_ref())
    }

    /// Namespaces with a registered handler, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Apply every entry of a parsed layer name to `element`.
    ///
    /// A bad entry is reported and skipped; the rest still apply.
    pub fn apply(
        &self,
        element: &mut Element<'_>,
        entries: &BTreeMap<String, String>,
        diagnostics: &mut Diagnostics,
    ) {
        let layer = element.layer().name().to_string();

        for (raw_key, value) in entries {
            let Some((namespace, key)) = raw_key.split_once(':') else {
                diagnostics.push(
                    Diagnostic::warning(
                        "strata::metadata",
                        format!("attribute '{}' has no namespace", raw_key),
                    )
                    .on_layer(&layer)
                    .with_help(format!("Use one of: {}", self.namespaces().join(", "))),
                );
                continue;
            };

            let Some(handler) = self.get(namespace) else {
                diagnostics.push(
                    Diagnostic::warning(
                        "strata::metadata",
                        format!("namespace '{}' not found", namespace),
                    )
                    .on_layer(&layer)
                    .with_help(format!("Use one of: {}", self.namespaces().join(", "))),
                );
                continue;
            };

            if let Err(e) = handler.apply(element, key, value) {
                diagnostics.push(
                    Diagnostic::warning("strata::metadata", e.to_string()).on_layer(&layer),
                );
            }
        }
    }
}

impl fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}
