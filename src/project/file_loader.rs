//! Ruby source discovery and loading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ProjectError;

/// Extension of indexable source files.
pub const RUBY_EXTENSION: &str = "rb";

pub fn is_ruby_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == RUBY_EXTENSION)
}

/// Collect every `.rb` file beneath the given paths.
///
/// Explicit file arguments are kept whatever their extension; directories
/// are walked recursively in file-name order.
pub fn collect_ruby_files<I, P>(paths: I) -> Result<Vec<PathBuf>, ProjectError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProjectError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("path not found: {}", path.display()),
            )));
        }
        if !path.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && is_ruby_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

pub fn load_file(path: &Path) -> Result<String, ProjectError> {
    Ok(std::fs::read_to_string(path)?)
}
