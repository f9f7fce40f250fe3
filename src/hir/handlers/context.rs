//! The immutable context handed down each level of the handler recursion.

use crate::base::FileName;
use crate::hir::{LocalScopeId, ObjectId, Registry, RegistryError, ScopeParent};

/// What `self` refers to in the body being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfBinding {
    /// Inside an instance method.
    Instance,
    /// Inside a namespace body or a singleton method.
    Class,
}

/// Where the dispatcher currently is.
///
/// Handlers derive a new context for the bodies they recurse into; the
/// caller's context is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Enclosing namespace; new objects are registered under it.
    pub namespace: ObjectId,
    /// Object whose body is being processed (a namespace or a method).
    pub owner: ObjectId,
    /// Current local scope.
    pub scope: LocalScopeId,
    pub self_binding: SelfBinding,
    /// File the nodes come from.
    pub file: FileName,
}

impl ParseContext {
    /// Context for the top level of a file: the root namespace, with a fresh
    /// local scope hung off it. The file body behaves like a namespace body.
    pub fn root(registry: &mut Registry, file: FileName) -> Result<Self, RegistryError> {
        let root = registry.root();
        let scope = registry.new_local_scope(root, None, ScopeParent::Namespace(root))?;
        Ok(Self {
            namespace: root,
            owner: root,
            scope,
            self_binding: SelfBinding::Class,
            file,
        })
    }

    /// Context for the body of a module or class.
    pub fn enter_namespace(&self, namespace: ObjectId, scope: LocalScopeId) -> Self {
        Self {
            namespace,
            owner: namespace,
            scope,
            self_binding: SelfBinding::Class,
            file: self.file.clone(),
        }
    }

    /// Context for the body of a method; the namespace is unchanged.
    pub fn enter_method(
        &self,
        method: ObjectId,
        scope: LocalScopeId,
        self_binding: SelfBinding,
    ) -> Self {
        Self {
            namespace: self.namespace,
            owner: method,
            scope,
            self_binding,
            file: self.file.clone(),
        }
    }
}
