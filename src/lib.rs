//! # rdex-base
//!
//! Core library for Ruby documentation indexing: parsing, the code-object
//! registry, handler dispatch and JSON export.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project      → Config, IndexHost, condense / bundle pipelines
//!   ↓
//! interchange  → JSON export, docstring rendering, graph conversion
//!   ↓
//! hir          → Code objects, Registry, local scopes, handler dispatch
//!   ↓
//! parser       → Logos lexer, recursive-descent rowan parser, typed AST
//!   ↓
//! base         → Primitives (FileName, Interner, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → interchange → project)
// ============================================================================

/// Foundation types: FileName, Interner, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST wrappers
pub mod parser;

/// High-level IR: code objects, registry, handler dispatcher
pub mod hir;

/// Export: JSON serializer, docstring rendering, graph conversion
pub mod interchange;

/// Project pipelines: configuration, host, store, condense, bundle
pub mod project;

// Re-export foundation types
pub use base::{FileName, Interner, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{CodeObject, ObjectKind, Registry, RegistryError, index_source};
pub use interchange::{ExportDocument, ExportObject, InterchangeError, JsonSerializer};
pub use parser::{Parse, SyntaxError, parse};
pub use project::{Condense, IndexConfig, IndexHost, ProjectError};
