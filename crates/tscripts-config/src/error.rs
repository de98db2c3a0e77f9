//! Error types for environment resolution and configuration synthesis.

use std::path::PathBuf;

use thiserror::Error;

use crate::variant::BuildVariant;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid package name '{name}': expected the scoped shape '@scope/name'")]
    InvalidPackageName { name: String },

    #[error("{variant} build requires a library name; set 'libName' in package.json or pass --lib-name")]
    MissingLibraryName { variant: BuildVariant },

    #[error("{variant} build could not resolve required field '{field}': {hint}")]
    MissingRequiredField {
        variant: BuildVariant,
        field: String,
        hint: String,
    },

    #[error("unknown build variant '{0}': expected one of app, umd-library, umd-tool")]
    UnknownVariant(String),

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
