//! JSON export of a registry.
//!
//! ## Document shape
//!
//! ```text
//! {"objects":[{"name":..,"path":..,"module":..,"kind":..,"file":..,
//!   "exported":..,"defStart":?,"defEnd":?,"docstring":?,"signature":?}]}
//! ```
//!
//! Only objects defined in the configured files are emitted. The trailing
//! newline is written by [`JsonSerializer::after_serialize`], so several
//! documents can be framed one per line.

use std::io::Write;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::docstring::{DocFormatter, RdocHtmlFormatter};
use super::error::InterchangeError;
use crate::base::FileName;
use crate::hir::{CodeObject, ObjectId, Registry};

/// Placeholder emitted when a docstring fails to render.
pub const DOC_ERROR_PLACEHOLDER: &str = "<!-- doc error -->";

/// The exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub objects: Vec<ExportObject>,
}

/// One code object as it appears in the exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportObject {
    pub name: String,
    pub path: String,
    /// Path of the enclosing namespace; empty at the top level.
    pub module: String,
    pub kind: String,
    pub file: String,
    pub exported: bool,
    #[serde(rename = "defStart", default, skip_serializing_if = "Option::is_none")]
    pub def_start: Option<u32>,
    /// Exclusive end offset.
    #[serde(rename = "defEnd", default, skip_serializing_if = "Option::is_none")]
    pub def_end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Writes the objects of a registry that belong to a fixed file set.
#[derive(Debug, Clone)]
pub struct JsonSerializer<F = RdocHtmlFormatter> {
    files: IndexSet<FileName>,
    formatter: F,
}

impl JsonSerializer {
    /// Create a serializer for the given files and directories.
    ///
    /// Directories are expanded into every regular file beneath them.
    /// An empty resulting set is an error.
    pub fn new<I, P>(paths: I) -> Result<Self, InterchangeError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let files = expand_paths(paths)?;
        if files.is_empty() {
            return Err(InterchangeError::EmptyFileSet);
        }
        debug!(files = files.len(), "serializer file set");
        Ok(Self {
            files,
            formatter: RdocHtmlFormatter,
        })
    }
}

impl<F: DocFormatter> JsonSerializer<F> {
    /// Swap the docstring formatter.
    pub fn with_formatter<G: DocFormatter>(self, formatter: G) -> JsonSerializer<G> {
        JsonSerializer {
            files: self.files,
            formatter,
        }
    }

    /// The expanded file set, in the order it was given.
    pub fn files(&self) -> impl Iterator<Item = &FileName> {
        self.files.iter()
    }

    pub fn includes(&self, file: &FileName) -> bool {
        self.files.contains(file)
    }

    /// Framing hook run before the document; writes nothing.
    pub fn before_serialize<W: Write>(&self, _out: &mut W) -> Result<(), InterchangeError> {
        Ok(())
    }

    /// Write the document for `registry` as compact JSON.
    pub fn serialize<W: Write>(
        &self,
        registry: &Registry,
        out: &mut W,
    ) -> Result<(), InterchangeError> {
        let document = self.document(registry);
        serde_json::to_writer(&mut *out, &document)?;
        Ok(())
    }

    /// Terminate the document with a newline.
    pub fn after_serialize<W: Write>(&self, out: &mut W) -> Result<(), InterchangeError> {
        out.write_all(b"\n")?;
        Ok(())
    }

    /// Build the export document without writing it.
    pub fn document(&self, registry: &Registry) -> ExportDocument {
        let objects = registry
            .iter()
            .filter_map(|(id, object)| self.export_object(registry, id, object))
            .collect();
        ExportDocument { objects }
    }

    fn export_object(
        &self,
        registry: &Registry,
        id: ObjectId,
        object: &CodeObject,
    ) -> Option<ExportObject> {
        let module = registry.get(registry.parent_module(id)?)?;
        let source = object.source.as_ref()?;
        if !self.includes(&source.file) {
            return None;
        }

        Some(ExportObject {
            name: object.name.to_string(),
            path: object.path.to_string(),
            module: module.path.to_string(),
            kind: object.kind().as_str().to_string(),
            file: source.file.to_string(),
            exported: object.is_exported(),
            def_start: Some(source.range.start().into()),
            def_end: Some(source.range.end().into()),
            docstring: self.render_docstring(object),
            signature: object
                .signature()
                .map(|s| s.strip_prefix("def ").unwrap_or(s).to_string()),
        })
    }

    fn render_docstring(&self, object: &CodeObject) -> Option<String> {
        if object.docstring.is_empty() {
            return None;
        }
        match self.formatter.format(&object.docstring) {
            Ok(html) => Some(html),
            Err(err) => {
                warn!(path = %object.path, error = %err, "docstring failed to render");
                Some(DOC_ERROR_PLACEHOLDER.to_string())
            }
        }
    }
}

/// Expand files and directories into a de-duplicated file set.
pub fn expand_paths<I, P>(paths: I) -> Result<IndexSet<FileName>, InterchangeError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = IndexSet::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.insert(FileName::from_path(path));
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.insert(FileName::from_path(entry.path()));
            }
        }
    }
    Ok(files)
}
