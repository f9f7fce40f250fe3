//! Local scopes: the lexical chain used inside method and block bodies.
//!
//! Scopes live in an arena owned by the registry and are addressed by
//! [`LocalScopeId`]. Each namespace owns a [`LocalScopeManager`] that names
//! the scopes it creates so they stay unique (`run_local_0`, `run_local_1`).

use std::cell::OnceCell;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ObjectId;

/// Separator between a local scope and its parent in a scope path.
pub const SCOPE_SEPARATOR: &str = ">";

/// Index of a local scope in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalScopeId(pub(crate) u32);

impl LocalScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a local scope hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeParent {
    Scope(LocalScopeId),
    Namespace(ObjectId),
}

/// A node in the local scope tree.
#[derive(Debug, Clone)]
pub struct LocalScope {
    /// Stored (uniquified) name.
    pub name: SmolStr,
    pub parent: ScopeParent,
    pub children: Vec<LocalScopeId>,
    pub(crate) path: OnceCell<Arc<str>>,
}

impl LocalScope {
    pub(crate) fn new(name: SmolStr, parent: ScopeParent) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            path: OnceCell::new(),
        }
    }
}

/// Per-namespace bookkeeping for scope names.
#[derive(Debug, Clone, Default)]
pub struct LocalScopeManager {
    by_name: FxHashMap<SmolStr, u32>,
    scopes: Vec<LocalScopeId>,
}

impl LocalScopeManager {
    /// Reserve the next stored name for `requested` (`""` when absent).
    pub(crate) fn next_name(&mut self, requested: Option<&str>) -> SmolStr {
        let base = requested.unwrap_or("");
        let counter = self.by_name.entry(SmolStr::new(base)).or_insert(0);
        let name = format!("{base}_local_{counter}");
        *counter += 1;
        SmolStr::new(name)
    }

    pub(crate) fn record(&mut self, id: LocalScopeId) {
        self.scopes.push(id);
    }

    /// Every scope created through this manager, oldest first.
    pub fn scopes(&self) -> &[LocalScopeId] {
        &self.scopes
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
