//! High-level IR (HIR): the code-object model and how it is built.
//!
//! ## Key Types
//!
//! - [`CodeObject`]: a namespace, method, instance variable or class variable
//! - [`Registry`]: path-keyed store of every code object, plus local scopes
//! - [`LocalScope`]: lexical scope chain used inside method bodies
//! - [`Processor`]: handler dispatcher that fills a registry from syntax
//!
//! ## Build Pipeline
//!
//! ```text
//! source text
//!     │
//!     ▼
//! parse(text)                  ← CST (parser module)
//!     │
//!     ▼
//! Processor::process_file      ← handler table, one context per body
//!     │
//!     ▼
//! Registry                     ← code objects + local scopes
//! ```

mod error;
mod handlers;
mod objects;
mod registry;
mod scope;

pub use error::RegistryError;
pub use handlers::{
    Guard, HANDLERS, Handler, HandlerEntry, ParseContext, Processor, SelfBinding, handlers_for,
};
pub use objects::{
    CLASS_METHOD_SEPARATOR, CodeObject, INSTANCE_METHOD_SEPARATOR, MethodScope,
    NAMESPACE_SEPARATOR, NamespaceFlavor, NewObject, ObjectDetails, ObjectId, ObjectKind,
    SourceRef, join_path,
};
pub use registry::Registry;
pub use scope::{LocalScope, LocalScopeId, LocalScopeManager, SCOPE_SEPARATOR, ScopeParent};

use crate::base::FileName;
use crate::parser::{AstNode, SourceFile, SyntaxError, parse};

/// Parse `text` and register everything it defines.
///
/// Syntax errors do not stop indexing; they are returned so the caller can
/// report them. Only registry invariant violations are fatal.
pub fn index_source(
    registry: &mut Registry,
    file: FileName,
    text: &str,
) -> Result<Vec<SyntaxError>, RegistryError> {
    let parsed = parse(text);
    if let Some(source) = SourceFile::cast(parsed.syntax()) {
        Processor::new(registry).process_file(file, &source)?;
    }
    Ok(parsed.errors)
}
