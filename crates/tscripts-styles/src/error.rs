use std::path::PathBuf;

use thiserror::Error;

/// Stylesheet pipeline errors.
#[derive(Debug, Error)]
pub enum StyleError {
    /// Two inputs flatten to the same output path.
    #[error(
        "'{first}' and '{second}' both flatten to '{output}'\n  \
         Hint: stylesheets nested more than one directory deep must have distinct parent directory names"
    )]
    OutputCollision {
        output: String,
        first: String,
        second: String,
    },

    /// The external preprocessor could not be started.
    #[error("Could not run '{program}': {source}\n  Hint: install less in the project (npm i -D less)")]
    PreprocessorUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The preprocessor rejected a file.
    #[error("Failed to compile {}: {message}", path.display())]
    Preprocess { path: PathBuf, message: String },

    /// CSS parsing, minification or printing failed.
    #[error("Failed to process CSS in {}: {message}", path.display())]
    Css { path: PathBuf, message: String },

    /// A browserslist query could not be resolved.
    #[error("Invalid browserslist query '{query}': {message}")]
    Targets { query: String, message: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk stylesheet tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl StyleError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StyleError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;
