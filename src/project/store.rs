//! Registry persistence.
//!
//! Pipelines only talk to [`RegistryStore`]; the on-disk format is up to the
//! implementation. [`MemoryStore`] keeps registries in memory.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::ProjectError;
use crate::hir::Registry;

/// Keyed persistence of built registries.
pub trait RegistryStore {
    /// Load the registry saved under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<Registry>, ProjectError>;

    fn save(&mut self, key: &str, registry: &Registry) -> Result<(), ProjectError>;

    fn contains(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Registry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Registry>, ProjectError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, registry: &Registry) -> Result<(), ProjectError> {
        if key.is_empty() {
            return Err(ProjectError::store("empty store key"));
        }
        debug!(key, objects = registry.len(), "saving registry");
        self.entries.insert(key.to_string(), registry.clone());
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
