//! The registry: a path-keyed store of every code object.
//!
//! Objects live in an arena (`Vec`) and are addressed by [`ObjectId`]; the
//! path index is an `IndexMap` so iteration follows registration order.
//! Local scopes live in a second arena owned by the same registry.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::objects::{CodeObject, NewObject, ObjectDetails, ObjectId, join_path};
use super::scope::{LocalScope, LocalScopeId, LocalScopeManager, SCOPE_SEPARATOR, ScopeParent};
use super::RegistryError;

/// Keyed store mapping canonical paths to code objects.
///
/// A fresh registry contains only the root namespace (empty path), which is
/// never returned by [`Registry::all_objects`].
#[derive(Debug, Clone)]
pub struct Registry {
    /// The single source of truth for all objects; index 0 is the root.
    objects: Vec<CodeObject>,
    /// Index by path -> object id (IndexMap preserves insertion order).
    by_path: IndexMap<Arc<str>, ObjectId>,
    /// Every local scope created by any namespace.
    scopes: Vec<LocalScope>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            objects: vec![CodeObject::root()],
            by_path: IndexMap::new(),
            scopes: Vec::new(),
        }
    }
}

impl Registry {
    /// Create a registry holding only the root namespace.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> ObjectId {
        ObjectId::ROOT
    }

    /// Register an object, or reopen the one already at its path.
    ///
    /// `init` runs on both paths: right after construction for a new object,
    /// and on the existing object when reopening, so later definitions
    /// update source, docstring and value in place.
    pub fn register<F>(&mut self, new: NewObject, init: F) -> Result<ObjectId, RegistryError>
    where
        F: FnOnce(&mut CodeObject),
    {
        let owner = self
            .objects
            .get(new.owner.index())
            .ok_or(RegistryError::UnknownObject(new.owner))?;
        if !owner.is_namespace() {
            return Err(RegistryError::not_a_namespace(owner.path.as_ref()));
        }

        let path = join_path(&owner.path, new.details.separator(), &new.name);
        let requested = new.details.kind();

        if let Some(&id) = self.by_path.get(path.as_str()) {
            let existing = self
                .objects
                .get_mut(id.index())
                .ok_or(RegistryError::UnknownObject(id))?;
            if existing.kind() != requested {
                return Err(RegistryError::KindMismatch {
                    path,
                    existing: existing.kind(),
                    requested,
                });
            }
            debug!(path = %path, "reopening code object");
            init(existing);
            return Ok(id);
        }

        let id = ObjectId::new(self.objects.len());
        let path: Arc<str> = Arc::from(path);
        let mut object = CodeObject {
            name: new.name,
            path: Arc::clone(&path),
            owner: Some(new.owner),
            children: Vec::new(),
            source: None,
            docstring: String::new(),
            details: new.details,
        };
        init(&mut object);

        debug!(path = %path, kind = %requested, "registered code object");
        self.objects.push(object);
        self.by_path.insert(path, id);
        if let Some(owner) = self.objects.get_mut(new.owner.index()) {
            owner.children.push(id);
        }
        Ok(id)
    }

    /// Copy every object of `other` whose path is not registered yet.
    ///
    /// Local scopes stay behind. Returns the number of objects added.
    pub fn merge(&mut self, other: &Registry) -> Result<usize, RegistryError> {
        let mut added = 0;
        for (_, object) in other.iter() {
            if self.by_path.contains_key(object.path.as_ref()) {
                continue;
            }
            let owner_path = object
                .owner
                .and_then(|owner| other.get(owner))
                .map(|owner| Arc::clone(&owner.path))
                .unwrap_or_else(|| Arc::from(""));
            let owner = if owner_path.is_empty() {
                ObjectId::ROOT
            } else {
                self.lookup(&owner_path)
                    .ok_or_else(|| RegistryError::not_a_namespace(owner_path.as_ref()))?
            };

            let details = match &object.details {
                ObjectDetails::Namespace {
                    flavor, superclass, ..
                } => ObjectDetails::Namespace {
                    flavor: *flavor,
                    superclass: superclass.clone(),
                    local_scopes: LocalScopeManager::default(),
                },
                details => details.clone(),
            };
            let source = object.source.clone();
            let docstring = object.docstring.clone();
            self.register(NewObject::new(owner, object.name.clone(), details), |merged| {
                merged.source = source;
                merged.docstring = docstring;
            })?;
            added += 1;
        }
        debug!(added, "merged registry");
        Ok(added)
    }

    pub fn get(&self, id: ObjectId) -> Option<&CodeObject> {
        self.objects.get(id.index())
    }

    /// Look up an object id by path.
    pub fn lookup(&self, path: &str) -> Option<ObjectId> {
        self.by_path.get(path).copied()
    }

    /// Look up an object by path.
    pub fn at(&self, path: &str) -> Option<&CodeObject> {
        self.lookup(path).and_then(|id| self.get(id))
    }

    /// Discard every object and scope, leaving a fresh root.
    pub fn clear(&mut self) {
        debug!(objects = self.by_path.len(), "clearing registry");
        *self = Self::default();
    }

    /// Every registered object except the root, in registration order.
    pub fn all_objects(&self) -> impl Iterator<Item = &CodeObject> {
        self.iter().map(|(_, object)| object)
    }

    /// Every registered object with its id, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &CodeObject)> {
        self.by_path
            .values()
            .filter_map(|&id| self.get(id).map(|object| (id, object)))
    }

    /// Number of registered objects (the root is not counted).
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Direct children of an object, in registration order.
    pub fn children(&self, id: ObjectId) -> impl Iterator<Item = &CodeObject> {
        self.get(id)
            .map(|object| object.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.get(child))
    }

    /// Nearest enclosing namespace of an object. `None` for the root.
    pub fn parent_module(&self, id: ObjectId) -> Option<ObjectId> {
        let mut current = self.get(id)?.owner?;
        loop {
            let object = self.get(current)?;
            if object.is_namespace() {
                return Some(current);
            }
            current = object.owner?;
        }
    }

    // =========================================================================
    // Local scopes
    // =========================================================================

    /// Create a local scope named by `owner`'s manager and hung off `parent`.
    ///
    /// The stored name is `name + "_local_" + k` (see [`LocalScopeManager`]).
    ///
    /// [`LocalScopeManager`]: super::LocalScopeManager
    pub fn new_local_scope(
        &mut self,
        owner: ObjectId,
        name: Option<&str>,
        parent: ScopeParent,
    ) -> Result<LocalScopeId, RegistryError> {
        match parent {
            ScopeParent::Scope(scope) if self.scope(scope).is_none() => {
                return Err(RegistryError::UnknownScope(scope.0));
            }
            ScopeParent::Namespace(ns) => match self.get(ns) {
                None => return Err(RegistryError::UnknownObject(ns)),
                Some(object) if !object.is_namespace() => {
                    return Err(RegistryError::not_a_namespace(object.path.as_ref()));
                }
                Some(_) => {}
            },
            ScopeParent::Scope(_) => {}
        }

        let id = LocalScopeId(self.scopes.len() as u32);
        let object = self
            .objects
            .get_mut(owner.index())
            .ok_or(RegistryError::UnknownObject(owner))?;
        let owner_path = Arc::clone(&object.path);
        let manager = object
            .local_scopes_mut()
            .ok_or_else(|| RegistryError::not_a_namespace(owner_path.as_ref()))?;
        let stored = manager.next_name(name);
        manager.record(id);

        trace!(scope = %stored, owner = %owner_path, "new local scope");
        self.scopes.push(LocalScope::new(stored, parent));
        if let ScopeParent::Scope(parent) = parent {
            if let Some(parent) = self.scopes.get_mut(parent.index()) {
                parent.children.push(id);
            }
        }
        Ok(id)
    }

    pub fn scope(&self, id: LocalScopeId) -> Option<&LocalScope> {
        self.scopes.get(id.index())
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// `parent>name`, or the bare name for scopes hung off the root.
    ///
    /// Computed on first request and cached in the scope.
    pub fn scope_path(&self, id: LocalScopeId) -> Option<Arc<str>> {
        let scope = self.scope(id)?;
        if let Some(path) = scope.path.get() {
            return Some(Arc::clone(path));
        }
        let parent_path = match scope.parent {
            ScopeParent::Scope(parent) => self.scope_path(parent)?,
            ScopeParent::Namespace(ns) => Arc::clone(&self.get(ns)?.path),
        };
        let path: Arc<str> = Arc::from(join_path(&parent_path, SCOPE_SEPARATOR, &scope.name));
        Some(Arc::clone(scope.path.get_or_init(|| path)))
    }

    /// Resolve `target` against `scope`'s direct children, then up the
    /// chain of parent scopes. A namespace parent ends the search.
    pub fn resolve_scope(&self, scope: LocalScopeId, target: &str) -> Option<LocalScopeId> {
        let mut current = self.scope(scope)?;
        loop {
            let found = current
                .children
                .iter()
                .copied()
                .find(|&child| self.scope(child).is_some_and(|s| s.name == target));
            if found.is_some() {
                return found;
            }
            match current.parent {
                ScopeParent::Scope(parent) => current = self.scope(parent)?,
                ScopeParent::Namespace(_) => return None,
            }
        }
    }

    /// Nearest namespace above a scope, skipping intermediate scopes.
    pub fn scope_parent_module(&self, scope: LocalScopeId) -> Option<ObjectId> {
        let mut current = self.scope(scope)?;
        loop {
            match current.parent {
                ScopeParent::Scope(parent) => current = self.scope(parent)?,
                ScopeParent::Namespace(ns) => return Some(ns),
            }
        }
    }
}
