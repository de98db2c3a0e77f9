//! `package.json` loading.
//!
//! Only two things are read from the project descriptor: the package `name`
//! and the optional `tscripts` build block.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::environment::BuildSettings;
use crate::error::{ConfigError, Result};

/// Key of the build block inside `package.json`.
pub const PACKAGE_BLOCK_KEY: &str = "tscripts";

/// The subset of `package.json` the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "tscripts")]
    pub build: Option<BuildSettings>,
}

impl PackageManifest {
    /// Load `package.json` from a project root.
    ///
    /// A missing file yields `Ok(None)`; a present but unreadable or
    /// malformed file is an error.
    pub fn load(root: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = root.as_ref().join("package.json");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no package.json found");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&content).map(Some)
    }

    /// Parse manifest JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "package.json".to_string(),
            hint: format!("Invalid JSON: {}", e),
        })?;

        if parsed.get(PACKAGE_BLOCK_KEY).is_some_and(|v| !v.is_null() && !v.is_object()) {
            return Err(ConfigError::InvalidValue {
                field: PACKAGE_BLOCK_KEY.to_string(),
                hint: "The 'tscripts' field must be an object".to_string(),
            });
        }

        serde_json::from_value(parsed).map_err(|e| ConfigError::InvalidValue {
            field: "package.json".to_string(),
            hint: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(PackageManifest::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn reads_name_and_build_block() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "name": "@acme/my-widget",
                "version": "1.0.0",
                "tscripts": { "mode": "production", "libName": "Widget", "publicPath": "/static/" }
            }"#,
        )
        .unwrap();

        let manifest = PackageManifest::load(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.name.as_deref(), Some("@acme/my-widget"));
        let build = manifest.build.unwrap();
        assert_eq!(build.mode.as_deref(), Some("production"));
        assert_eq!(build.lib_name.as_deref(), Some("Widget"));
        assert_eq!(build.public_path.as_deref(), Some("/static/"));
        assert!(build.output_path.is_none());
    }

    #[test]
    fn rejects_non_object_build_block() {
        let err = PackageManifest::from_json(r#"{ "name": "x", "tscripts": "prod" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "tscripts"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PackageManifest::from_json("{ name: ").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
