use anyhow::Result;
use glob::glob;
use std::path::{Path, PathBuf};

/// Expands one wildcard pattern relative to `root` into the matching files.
///
/// A pattern that matches nothing yields an empty list; whether that is
/// acceptable is decided by the caller, not here.
pub fn expand_glob(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = root.join(pattern);
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in glob(&full_pattern.to_string_lossy())? {
        files.push(entry?);
    }
    Ok(files)
}
