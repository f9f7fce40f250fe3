//! Condense: index a set of sources and emit the JSON document for them.
//!
//! ```text
//! IndexConfig
//!     │
//!     ▼
//! cached registry (use_cache) or empty
//!     │  + stdlib index (unless omit_stdlib)
//!     │  + load_index_files
//!     ▼
//! IndexHost::load_paths(files)
//!     │
//!     ▼
//! JsonSerializer before / serialize / after
//! ```

use std::io::Write;

use tracing::{debug, info, warn};

use super::config::STDLIB_INDEX_KEY;
use super::{IndexConfig, IndexHost, ProjectError, RegistryStore};
use crate::interchange::JsonSerializer;

/// What a condense run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CondenseReport {
    /// Whether the run started from the cached registry.
    pub loaded_cache: bool,
    /// Store keys merged in before indexing.
    pub merged_indexes: Vec<String>,
    pub indexed_files: usize,
    pub syntax_errors: usize,
    /// Files skipped because they could not be read.
    pub unreadable_files: usize,
}

pub struct Condense;

impl Condense {
    /// Build the index described by `config` and write its document to `out`.
    pub fn run<S, W>(
        config: &IndexConfig,
        store: &S,
        out: &mut W,
    ) -> Result<CondenseReport, ProjectError>
    where
        S: RegistryStore + ?Sized,
        W: Write,
    {
        config.validate()?;
        let serializer = JsonSerializer::new(&config.files)?;
        let mut report = CondenseReport::default();

        let cached = if config.use_cache {
            info!(key = %config.cache_key, "loading main index");
            store.load(&config.cache_key)?
        } else {
            None
        };
        let mut host = match cached {
            Some(registry) => {
                report.loaded_cache = true;
                IndexHost::with_registry(registry)
            }
            None => IndexHost::new(),
        };

        for key in dependency_keys(config) {
            match store.load(key)? {
                Some(index) => {
                    let added = host.registry_mut().merge(&index)?;
                    debug!(key, added, "merged index");
                    report.merged_indexes.push(key.to_string());
                }
                None => warn!(key, "index not found in store"),
            }
        }

        let loaded = host.load_paths(&config.files)?;
        report.syntax_errors = loaded.syntax_errors;
        report.unreadable_files = loaded.unreadable.len();
        report.indexed_files = host.file_count();

        serializer.before_serialize(out)?;
        serializer.serialize(host.registry(), out)?;
        serializer.after_serialize(out)?;
        Ok(report)
    }
}

fn dependency_keys(config: &IndexConfig) -> impl Iterator<Item = &str> {
    let stdlib = (!config.omit_stdlib).then_some(STDLIB_INDEX_KEY);
    stdlib
        .into_iter()
        .chain(config.load_index_files.iter().map(String::as_str))
}
