//! Error types for registry operations.

use thiserror::Error;

use super::{ObjectId, ObjectKind};

/// Errors that abort building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A path is already taken by an object of a different kind.
    #[error("cannot register {requested} at `{path}`: already registered as {existing}")]
    KindMismatch {
        path: String,
        existing: ObjectKind,
        requested: ObjectKind,
    },

    /// Local scopes and nested objects can only live in namespaces.
    #[error("`{path}` is not a namespace")]
    NotANamespace { path: String },

    /// The id does not belong to this registry (or it was cleared).
    #[error("unknown code object #{0}")]
    UnknownObject(ObjectId),

    /// The local scope id does not belong to this registry.
    #[error("unknown local scope #{0}")]
    UnknownScope(u32),
}

impl RegistryError {
    /// Create a not-a-namespace error.
    pub fn not_a_namespace(path: impl Into<String>) -> Self {
        Self::NotANamespace { path: path.into() }
    }
}
