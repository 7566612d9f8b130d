//! Non-fatal problems found while converting a document.
//!
//! A bad layer name, an unknown metadata namespace or a failing heuristic
//! only degrades the affected element. Each one is logged as it happens and
//! collected here so the CLI can report them at the end of a run.

use std::fmt;

/// A single conversion diagnostic. Every one is a warning: anything worse
/// aborts the conversion with a [`StrataError`](crate::error::StrataError).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Machine-readable code, e.g. `strata::layer-name`.
    pub code: String,
    pub message: String,
    /// Name of the layer the problem was found on, if any.
    pub layer: Option<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            layer: None,
            help: None,
        }
    }

    /// Record the layer this diagnostic belongs to.
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)?;
        if let Some(layer) = &self.layer {
            write!(f, " (layer '{}')", layer)?;
        }
        Ok(())
    }
}

/// Collects diagnostics over one conversion.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a diagnostic and keep it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Whether any diagnostic carries the given code.
    pub fn contains_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}
