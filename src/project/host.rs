//! IndexHost: owns the registry of one build.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = IndexHost::new();
//!
//! // Index sources
//! let errors = host.set_file_content("lib/a.rb", "module A\nend\n")?;
//!
//! // Query the result
//! let a = host.registry().at("A");
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{ProjectError, file_loader};
use crate::base::{FileName, Interner};
use crate::hir::{Registry, RegistryError, index_source};
use crate::parser::SyntaxError;

/// Outcome of [`IndexHost::load_paths`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub syntax_errors: usize,
    /// Files skipped because they could not be read as UTF-8 text.
    pub unreadable: Vec<PathBuf>,
}

/// Owns the registry being built and the file names feeding it.
#[derive(Debug, Default)]
pub struct IndexHost {
    registry: Registry,
    interner: Interner,
    /// Files indexed so far, with their syntax error counts.
    files: IndexMap<FileName, usize>,
}

impl IndexHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing registry (for example a cached one).
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Parse `content` as the file at `path` and register what it defines.
    ///
    /// Returns the syntax errors; they never stop indexing.
    pub fn set_file_content(
        &mut self,
        path: &str,
        content: &str,
    ) -> Result<Vec<SyntaxError>, RegistryError> {
        let file = self.interner.intern(path);
        let errors = index_source(&mut self.registry, file.clone(), content)?;
        if !errors.is_empty() {
            warn!(file = %file, errors = errors.len(), "syntax errors while indexing");
        }
        self.files.insert(file, errors.len());
        Ok(errors)
    }

    /// Read a file from disk and index it.
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<SyntaxError>, ProjectError> {
        let content = file_loader::load_file(path)?;
        let name = FileName::from_path(path);
        Ok(self.set_file_content(name.as_str(), &content)?)
    }

    /// Index every `.rb` file beneath `paths`.
    ///
    /// A file that cannot be read is logged and skipped; only registry
    /// errors stop the load.
    pub fn load_paths<I, P>(&mut self, paths: I) -> Result<LoadReport, ProjectError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let files = file_loader::collect_ruby_files(paths)?;
        debug!(files = files.len(), "indexing sources");
        let mut report = LoadReport::default();
        for path in files {
            let content = match file_loader::load_file(&path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping unreadable file");
                    report.unreadable.push(path);
                    continue;
                }
            };
            let name = FileName::from_path(&path);
            report.syntax_errors += self.set_file_content(name.as_str(), &content)?.len();
        }
        Ok(report)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.interner
            .get(path)
            .is_some_and(|file| self.files.contains_key(&file))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Discard every object, scope and file.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.interner.clear();
        self.files.clear();
    }
}
