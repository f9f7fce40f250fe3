//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while building or writing an export document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The serializer was given nothing to emit.
    #[error("no files to serialize")]
    EmptyFileSet,
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}

/// Failure to render a docstring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An inline markup marker was opened and never closed.
    #[error("unterminated `{marker}` markup starting at byte {offset}")]
    Unterminated { marker: char, offset: usize },
}
