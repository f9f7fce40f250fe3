//! Export formats for a built registry.
//!
//! ```text
//! Registry
//!     │
//!     ▼
//! JsonSerializer::serialize      ← file-set filter + projection
//!     │                            (DocFormatter renders docstrings)
//!     ▼
//! ExportDocument  ──► {"objects":[...]}\n
//!     │
//!     ▼
//! graph::convert                 ← graph symbols and docs
//! ```

mod docstring;
mod error;
pub mod graph;
mod json;

pub use docstring::{DocFormatter, RdocHtmlFormatter};
pub use error::{FormatError, InterchangeError};
pub use graph::{GraphDoc, GraphOutput, GraphSymbol, SymbolData, SymbolKind};
pub use json::{DOC_ERROR_PLACEHOLDER, ExportDocument, ExportObject, JsonSerializer, expand_paths};
