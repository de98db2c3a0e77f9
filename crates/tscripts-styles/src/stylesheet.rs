//! Stylesheets and the copy-mode rewrite.

use rayon::prelude::*;

use crate::flatten::flatten;
use crate::imports::{import_references, rewrite_imports};

/// One stylesheet read from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetFile {
    /// Slash-separated path relative to the source root.
    pub original_path: String,
    pub content: String,
}

impl StylesheetFile {
    pub fn new(original_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            original_path: original_path.into(),
            content: content.into(),
        }
    }

    /// Path relative to the output root.
    pub fn relocated_path(&self) -> String {
        flatten(&self.original_path)
    }

    /// `.less` references imported by this file, derived on each call.
    pub fn import_references(&self) -> Vec<String> {
        import_references(&self.content)
    }
}

/// Relocate each file and rewrite its imports.
///
/// Files are independent, so the batch is processed in parallel; output order
/// follows input order.
pub fn rewrite(files: &[StylesheetFile]) -> Vec<(String, String)> {
    files
        .par_iter()
        .map(|file| {
            (
                file.relocated_path(),
                rewrite_imports(&file.content).into_owned(),
            )
        })
        .collect()
}
