//! Code objects: the named program entities stored in the registry.
//!
//! Every object shares one base record (name, path, owner, children, source,
//! docstring) and carries variant data in [`ObjectDetails`].

use std::fmt;
use std::sync::Arc;

use rowan::TextRange;
use smol_str::SmolStr;

use super::scope::LocalScopeManager;
use crate::base::FileName;

/// Separator between a namespace and a nested namespace or variable.
pub const NAMESPACE_SEPARATOR: &str = "::";
/// Separator between a namespace and an instance method.
pub const INSTANCE_METHOD_SEPARATOR: &str = "#";
/// Separator between a namespace and a singleton method.
pub const CLASS_METHOD_SEPARATOR: &str = ".";

/// Index of a code object in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// The root namespace; always present in a registry.
    pub const ROOT: ObjectId = ObjectId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The variant of a code object, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Namespace,
    Method,
    InstanceVariable,
    ClassVariable,
}

impl ObjectKind {
    /// Kind string used in exported documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Namespace => "namespace",
            ObjectKind::Method => "method",
            ObjectKind::InstanceVariable => "instancevariable",
            ObjectKind::ClassVariable => "classvariable",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a namespace was opened with `module` or `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceFlavor {
    Module,
    Class,
}

/// Whether a method is called on instances or on the namespace itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodScope {
    Instance,
    Class,
}

impl MethodScope {
    pub fn separator(self) -> &'static str {
        match self {
            MethodScope::Instance => INSTANCE_METHOD_SEPARATOR,
            MethodScope::Class => CLASS_METHOD_SEPARATOR,
        }
    }
}

/// Where a code object was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub file: FileName,
    /// Half-open byte range of the defining node.
    pub range: TextRange,
    /// Verbatim source text of the defining node.
    pub text: Arc<str>,
}

/// Variant-specific data of a code object.
#[derive(Debug, Clone)]
pub enum ObjectDetails {
    Namespace {
        flavor: NamespaceFlavor,
        superclass: Option<Arc<str>>,
        local_scopes: LocalScopeManager,
    },
    Method {
        signature: Arc<str>,
        scope: MethodScope,
    },
    InstanceVariable {
        value: Arc<str>,
    },
    ClassVariable {
        value: Arc<str>,
    },
}

impl ObjectDetails {
    pub fn namespace(flavor: NamespaceFlavor) -> Self {
        ObjectDetails::Namespace {
            flavor,
            superclass: None,
            local_scopes: LocalScopeManager::default(),
        }
    }

    pub fn method(scope: MethodScope) -> Self {
        ObjectDetails::Method {
            signature: Arc::from(""),
            scope,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectDetails::Namespace { .. } => ObjectKind::Namespace,
            ObjectDetails::Method { .. } => ObjectKind::Method,
            ObjectDetails::InstanceVariable { .. } => ObjectKind::InstanceVariable,
            ObjectDetails::ClassVariable { .. } => ObjectKind::ClassVariable,
        }
    }

    /// Path separator placed between the owner's path and this object's name.
    pub fn separator(&self) -> &'static str {
        match self {
            ObjectDetails::Method { scope, .. } => scope.separator(),
            _ => NAMESPACE_SEPARATOR,
        }
    }
}

/// A named program entity.
#[derive(Debug, Clone)]
pub struct CodeObject {
    pub name: SmolStr,
    /// Canonical, unique path (`A::B`, `A::B#run`, `A::B::@x`).
    pub path: Arc<str>,
    /// Enclosing object; `None` only for the root namespace.
    pub owner: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    pub source: Option<SourceRef>,
    pub docstring: String,
    pub details: ObjectDetails,
}

impl CodeObject {
    pub(crate) fn root() -> Self {
        Self {
            name: SmolStr::default(),
            path: Arc::from(""),
            owner: None,
            children: Vec::new(),
            source: None,
            docstring: String::new(),
            details: ObjectDetails::namespace(NamespaceFlavor::Module),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.details.kind()
    }

    pub fn is_root(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_namespace(&self) -> bool {
        self.kind() == ObjectKind::Namespace
    }

    pub fn is_method(&self) -> bool {
        self.kind() == ObjectKind::Method
    }

    pub fn file(&self) -> Option<&FileName> {
        self.source.as_ref().map(|s| &s.file)
    }

    pub fn range(&self) -> Option<TextRange> {
        self.source.as_ref().map(|s| s.range)
    }

    /// Verbatim right-hand side for variables.
    pub fn value(&self) -> Option<&str> {
        match &self.details {
            ObjectDetails::InstanceVariable { value } | ObjectDetails::ClassVariable { value } => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Replace the value of a variable; no-op for other kinds.
    pub fn set_value(&mut self, new_value: impl Into<Arc<str>>) {
        if let ObjectDetails::InstanceVariable { value } | ObjectDetails::ClassVariable { value } =
            &mut self.details
        {
            *value = new_value.into();
        }
    }

    /// Definition line for methods (`def foo(a, b)`).
    pub fn signature(&self) -> Option<&str> {
        match &self.details {
            ObjectDetails::Method { signature, .. } => Some(signature),
            _ => None,
        }
    }

    pub fn set_signature(&mut self, new_signature: impl Into<Arc<str>>) {
        if let ObjectDetails::Method { signature, .. } = &mut self.details {
            *signature = new_signature.into();
        }
    }

    pub fn method_scope(&self) -> Option<MethodScope> {
        match &self.details {
            ObjectDetails::Method { scope, .. } => Some(*scope),
            _ => None,
        }
    }

    pub fn flavor(&self) -> Option<NamespaceFlavor> {
        match &self.details {
            ObjectDetails::Namespace { flavor, .. } => Some(*flavor),
            _ => None,
        }
    }

    pub fn superclass(&self) -> Option<&str> {
        match &self.details {
            ObjectDetails::Namespace { superclass, .. } => superclass.as_deref(),
            _ => None,
        }
    }

    pub fn set_superclass(&mut self, name: impl Into<Arc<str>>) {
        if let ObjectDetails::Namespace { superclass, .. } = &mut self.details {
            *superclass = Some(name.into());
        }
    }

    pub fn local_scopes(&self) -> Option<&LocalScopeManager> {
        match &self.details {
            ObjectDetails::Namespace { local_scopes, .. } => Some(local_scopes),
            _ => None,
        }
    }

    pub(crate) fn local_scopes_mut(&mut self) -> Option<&mut LocalScopeManager> {
        match &mut self.details {
            ObjectDetails::Namespace { local_scopes, .. } => Some(local_scopes),
            _ => None,
        }
    }

    /// Names starting with `@` (instance and class variables) are private.
    pub fn is_exported(&self) -> bool {
        !self.name.starts_with('@')
    }
}

/// Everything needed to create an object that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewObject {
    pub owner: ObjectId,
    pub name: SmolStr,
    pub details: ObjectDetails,
}

impl NewObject {
    pub fn new(owner: ObjectId, name: impl Into<SmolStr>, details: ObjectDetails) -> Self {
        Self {
            owner,
            name: name.into(),
            details,
        }
    }
}

/// Join an owner path and a name; objects owned by the root keep a bare name.
pub fn join_path(owner_path: &str, separator: &str, name: &str) -> String {
    if owner_path.is_empty() {
        name.to_string()
    } else {
        format!("{owner_path}{separator}{name}")
    }
}
