//! Error types for logplate.
//!
//! Uses `thiserror` for library errors; the binary wraps these with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for logplate operations
pub type LogplateResult<T> = Result<T, LogplateError>;

/// Main error type for logplate operations
#[derive(Error, Debug)]
pub enum LogplateError {
    /// Template text is not well-formed JSON. Raised at compile time,
    /// before any event is processed; no partial plan is produced.
    #[error("template syntax error at line {line}, column {column}: {message}")]
    TemplateSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The output writer faulted mid-record. The current record is
    /// abandoned; the encoder stays usable for subsequent records.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl LogplateError {
    /// Map a serde_json parse failure to a `TemplateSyntax` error.
    pub(crate) fn template_syntax(err: &serde_json::Error) -> Self {
        LogplateError::TemplateSyntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
