//! Error types for project-level pipelines.

use thiserror::Error;

use crate::hir::RegistryError;
use crate::interchange::InterchangeError;

/// Errors raised while configuring, building or persisting an index.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error while reading sources.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Registry invariant violated while indexing.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Export failure.
    #[error(transparent)]
    Interchange(#[from] InterchangeError),
}

impl ProjectError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

impl From<serde_json::Error> for ProjectError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}
