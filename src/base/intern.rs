//! File name interner.
//!
//! Uses `Arc<str>` for cheap cloning (reference count increment instead of allocation).
//! The interner deduplicates names so every code object from the same file
//! shares one allocation.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::FileName;

/// Interner that deduplicates file names.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: FxHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a file name, returning a cheap-to-clone identifier.
    ///
    /// If the name was already interned, the existing allocation is shared.
    pub fn intern(&mut self, s: &str) -> FileName {
        if let Some(existing) = self.strings.get(s) {
            return FileName::from(Arc::clone(existing));
        }
        let rc: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&rc));
        FileName::from(rc)
    }

    /// Get an interned name if it exists, without creating it.
    pub fn get(&self, s: &str) -> Option<FileName> {
        self.strings.get(s).cloned().map(FileName::from)
    }

    /// Number of unique names interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no names have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Clear all interned names.
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
