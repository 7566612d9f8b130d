//! Terminal output for the strata CLI.
//!
//! Status lines go to stderr in the Cargo style, with a right-aligned
//! coloured verb. stdout only ever carries generated content (completions).

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::diagnostics::{Diagnostic, Diagnostics};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the verb column.
const VERB_WIDTH: usize = 12;

/// Writes status lines to stderr, coloured when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "  Converting site.yaml"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print every diagnostic of a conversion, then a one-line summary.
    pub fn diagnostics(&self, diagnostics: &Diagnostics) {
        for diagnostic in diagnostics.iter() {
            self.diagnostic(diagnostic);
        }
        if !diagnostics.is_empty() {
            self.warning(
                "Finished",
                &format!("with {}", plural(diagnostics.len(), "warning", "warnings")),
            );
        }
    }

    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", self.format_diagnostic(diagnostic));
    }

    /// `warning[code]: message`, then indented layer and help lines.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut out = format!(
            "{}{}: {}",
            self.label("warning"),
            self.dim(&format!("[{}]", diagnostic.code)),
            diagnostic.message
        );
        if let Some(layer) = &diagnostic.layer {
            out.push_str(&format!("\n  {} layer '{}'", self.dim("-->"), layer));
        }
        if let Some(help) = &diagnostic.help {
            out.push_str(&format!("\n  {} {}", self.dim("help:"), help));
        }
        out
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Paths and other informational values.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// `plural(1, "layer", "layers")` → "1 layer".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Relative to the working directory when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "warning", "warnings"), "1 warning");
        assert_eq!(plural(0, "warning", "warnings"), "0 warnings");
        assert_eq!(plural(3, "element", "elements"), "3 elements");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/path/to/site.yaml");
        assert_eq!(display_path(p), "/nonexistent/path/to/site.yaml");
    }

    #[test]
    fn test_format_diagnostic_plain() {
        let d = Diagnostic::warning("strata::metadata", "namespace 'js' not found")
            .on_layer("btn[js:click=\"x\"]")
            .with_help("Use one of: attr, css");

        assert_eq!(
            Printer::plain().format_diagnostic(&d),
            "warning[strata::metadata]: namespace 'js' not found\n  \
             --> layer 'btn[js:click=\"x\"]'\n  \
             help: Use one of: attr, css"
        );
    }
}
