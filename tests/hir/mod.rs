//! HIR layer tests
//!
//! Tests for the code-object model built by the handler dispatcher:
//! - Namespace, method and variable registration
//! - Reopening across files
//! - Local scope chains
//! - Error propagation on path collisions

pub mod tests_indexing;
pub mod tests_scopes;
