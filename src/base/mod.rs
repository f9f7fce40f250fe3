//! Foundation types for the rdex toolchain.
//!
//! This module provides fundamental types used throughout the indexer:
//! - [`FileName`] - Shared, cheaply cloned source file identifiers
//! - [`Interner`] - Deduplicates file identifiers across a build
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other rdex modules.

mod file_name;
mod intern;

pub use file_name::FileName;
pub use intern::Interner;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
