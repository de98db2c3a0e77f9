//! Source tree discovery and atomic output writes.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, StyleError};
use crate::stylesheet::StylesheetFile;

fn is_hidden_or_vendor(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "node_modules")
}

/// Read every file under `root` with the given extension (no dot).
///
/// Paths are relative to `root`, slash-separated and sorted. A missing root
/// yields no files.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<StylesheetFile>> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "stylesheet root does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_or_vendor(e))
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let original_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = fs::read_to_string(path).map_err(StyleError::io(path))?;
        files.push(StylesheetFile::new(original_path, content));
    }

    tracing::debug!(root = %root.display(), extension, count = files.len(), "discovered stylesheets");
    Ok(files)
}

/// Write `content` to `path` through a temp file in the same directory, so
/// readers never observe a partial file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(StyleError::io(dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(StyleError::io(dir))?;
    tmp.write_all(content.as_bytes())
        .map_err(StyleError::io(tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| StyleError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}
