//! Error handling for the tscripts CLI.
//!
//! Library errors ([`tscripts_config::ConfigError`], [`tscripts_styles::StyleError`])
//! convert into [`CliError`] automatically; [`BuildError`] covers the hand-off
//! to the external bundler. `main` turns the final error into a miette report.
//!
//! ```rust,no_run
//! use tscripts_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub use tscripts_config::ConfigError;
pub use tscripts_styles::StyleError;

mod miette;
pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment resolution or synthesis failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Stylesheet pipeline failed
    #[error("Stylesheet error: {0}")]
    Styles(#[from] StyleError),

    /// Hand-off to the external bundler failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    #[error("{0}")]
    Custom(String),
}

/// Errors handing the configuration to the external bundler.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The bundler program could not be started
    #[error("Could not start '{program}': {source}\n\nHint: install the bundler in the project (npm i -D webpack webpack-cli) or pass --bundler")]
    BundlerUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The bundler exited unsuccessfully; its output has already been shown
    #[error("'{command}' exited with {}", exit_description(.code))]
    BundlerFailed { command: String, code: Option<i32> },

    /// The configuration file for the bundler could not be written
    #[error("Failed to write bundler configuration to {}: {reason}\n\nHint: Check permissions of the cache directory", .path.display())]
    ConfigWriteFailed { path: PathBuf, reason: String },

    /// The bundler command line is empty or malformed
    #[error("Invalid bundler command '{0}'\n\nHint: pass a program and its arguments, e.g. --bundler \"npx webpack\"")]
    InvalidCommand(String),
}

fn exit_description(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
