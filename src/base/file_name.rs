//! Source file identifiers.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Identifier of the file a syntax node or code object originates from.
///
/// This is the path exactly as the caller supplied it (no canonicalization),
/// so the serializer can compare it against its configured file set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileName(Arc<str>);

impl FileName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Build a file name from a path, using its lossy string form.
    pub fn from_path(path: &Path) -> Self {
        Self(Arc::from(path.to_string_lossy().as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for files that conventionally hold tests or specs.
    pub fn is_test(&self) -> bool {
        let s = self.as_str();
        s.contains("_test.rb") || s.contains("_spec.rb") || s.contains("test/") || s.contains("spec/")
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Arc<str>> for FileName {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}
