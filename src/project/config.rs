//! Index configuration.
//!
//! ```json
//! {
//!   "files": ["lib", "app/models/user.rb"],
//!   "use_cache": true,
//!   "cache_key": ".rdex",
//!   "omit_stdlib": false,
//!   "load_index_files": ["rack-2.2.8"]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ProjectError;

/// Store key of the standard library index.
pub const STDLIB_INDEX_KEY: &str = "ruby-stdlib";

/// Store key of the main index when none is configured.
pub const DEFAULT_CACHE_KEY: &str = ".rdex";

/// Inputs of an index build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Source files and directories to index and export.
    pub files: Vec<PathBuf>,
    /// Start from the registry stored under `cache_key`.
    pub use_cache: bool,
    pub cache_key: String,
    /// Skip merging the standard library index.
    pub omit_stdlib: bool,
    /// Additional stored indexes (usually dependencies) merged before indexing.
    pub load_index_files: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            use_cache: false,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            omit_stdlib: false,
            load_index_files: Vec::new(),
        }
    }
}

impl IndexConfig {
    pub fn new(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.files.is_empty() {
            return Err(ProjectError::config("no files to index"));
        }
        if self.use_cache && self.cache_key.trim().is_empty() {
            return Err(ProjectError::config("use_cache requires a cache_key"));
        }
        if self.load_index_files.iter().any(|key| key.trim().is_empty()) {
            return Err(ProjectError::config("empty index key in load_index_files"));
        }
        Ok(())
    }
}
