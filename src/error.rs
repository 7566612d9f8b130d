use miette::Diagnostic;
use thiserror::Error;

/// Main error type for strata operations
#[derive(Error, Diagnostic, Debug)]
pub enum StrataError {
    #[error("IO error: {0}")]
    #[diagnostic(code(strata::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(strata::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(strata::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed layer tree: {message}")]
    #[diagnostic(code(strata::structure))]
    Structure {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Metadata error: {message}")]
    #[diagnostic(code(strata::metadata))]
    Metadata { message: String },

    #[error("Heuristic '{name}' failed: {message}")]
    #[diagnostic(code(strata::heuristic))]
    Heuristic { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, StrataError>;
