//! Output relocation.

/// Relocate a slash-separated relative path to the output root.
///
/// A root-level file keeps its name. A nested file is renamed after its
/// immediate parent directory, keeping its extension:
/// `component/button/index.less` becomes `button.less`.
pub fn flatten(path: &str) -> String {
    let path = path.trim_start_matches("./");
    let Some((dir, file)) = path.rsplit_once('/') else {
        return path.to_string();
    };

    let parent = dir.rsplit('/').next().unwrap_or(dir);
    if parent.is_empty() {
        return file.to_string();
    }
    format!("{}{}", parent, extension(file))
}

/// Extension including the dot, or empty for dotfiles and bare names.
fn extension(file: &str) -> &str {
    match file.rfind('.') {
        Some(0) | None => "",
        Some(pos) => &file[pos..],
    }
}

/// Replace the extension of a flattened path.
pub fn with_extension(path: &str, ext: &str) -> String {
    let stem_len = path.len() - extension(path).len();
    format!("{}.{}", &path[..stem_len], ext)
}
