//! The configuration value handed to the external bundler.
//!
//! Field names serialize in the bundler's camelCase vocabulary. Loader and
//! plugin options are opaque JSON since their shape belongs to each plugin.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::mode::Mode;

/// Inline assets below this size (bytes); emit files above it.
pub const INLINE_ASSET_LIMIT: u64 = 10 * 1024;

/// Default entry/asset size warning threshold (5 MiB).
pub const WARN_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Strict-profile entry/asset size warning threshold (2 MiB).
pub const STRICT_WARN_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Complete bundler configuration for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub mode: Mode,
    /// Stop at the first error.
    pub bail: bool,
    pub devtool: Devtool,
    pub stats: String,
    pub entry: String,
    pub output: OutputOptions,
    pub module: ModuleOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,
    pub resolve: ResolveOptions,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub externals: BTreeMap<String, String>,
    pub optimization: OptimizationOptions,
    pub performance: PerformanceOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,
}

impl Configuration {
    /// Serialize for hand-off to the bundler.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether any rule applies the named loader.
    pub fn uses_loader(&self, loader: &str) -> bool {
        self.module
            .rules
            .iter()
            .flat_map(|group| &group.one_of)
            .flat_map(|rule| &rule.use_)
            .any(|spec| spec.loader == loader)
    }

    /// Whether a plugin with this name is configured.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }
}

/// Source map style. Serializes as the style name, or `false` when off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Devtool {
    Disabled,
    Style(String),
}

impl Devtool {
    pub fn style(&self) -> Option<&str> {
        match self {
            Devtool::Disabled => None,
            Devtool::Style(style) => Some(style),
        }
    }
}

impl Serialize for Devtool {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Devtool::Disabled => serializer.serialize_bool(false),
            Devtool::Style(style) => serializer.serialize_str(style),
        }
    }
}

impl<'de> Deserialize<'de> for Devtool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(Devtool::Disabled),
            Value::String(style) => Ok(Devtool::Style(style)),
            other => Err(de::Error::custom(format!(
                "devtool must be false or a style name, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: String,
    pub chunk_filename: String,
    pub global_object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryOptions>,
    /// Remove stale output before emitting.
    pub clean: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
    /// Missing exports are errors rather than warnings.
    pub strict_export_presence: bool,
    pub rules: Vec<RuleGroup>,
}

/// First-match rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup {
    pub one_of: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Regular expression source matched against module paths.
    pub test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub use_: Vec<LoaderSpec>,
    /// Built-in module type (e.g. `asset`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Value>,
}

impl Rule {
    pub fn new(test: impl Into<String>, use_: Vec<LoaderSpec>) -> Self {
        Self {
            test: test.into(),
            exclude: None,
            use_,
            kind: None,
            parser: None,
            generator: None,
        }
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }
}

/// A loader identified by name with opaque options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSpec {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>, options: Option<Value>) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

/// A plugin or minimizer identified by name with opaque options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    pub main_fields: Vec<String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOptions {
    pub minimize: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimizer: Vec<PluginSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceHints {
    Warning,
}

/// Size budget. Exceeding it is reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceOptions {
    pub hints: PerformanceHints,
    pub max_entrypoint_size: u64,
    pub max_asset_size: u64,
}

/// What a size check measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSubject {
    Asset,
    Entrypoint,
}

/// A threshold overrun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeWarning {
    pub subject: SizeSubject,
    pub size: u64,
    pub limit: u64,
}

impl PerformanceOptions {
    pub fn warn_above(limit: u64) -> Self {
        Self {
            hints: PerformanceHints::Warning,
            max_entrypoint_size: limit,
            max_asset_size: limit,
        }
    }

    pub fn check_asset(&self, size: u64) -> Option<SizeWarning> {
        (size > self.max_asset_size).then_some(SizeWarning {
            subject: SizeSubject::Asset,
            size,
            limit: self.max_asset_size,
        })
    }

    pub fn check_entrypoint(&self, size: u64) -> Option<SizeWarning> {
        (size > self.max_entrypoint_size).then_some(SizeWarning {
            subject: SizeSubject::Entrypoint,
            size,
            limit: self.max_entrypoint_size,
        })
    }
}

/// Persistent on-disk compilation cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub cache_directory: PathBuf,
    /// Generation token; a change discards the cache.
    pub version: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    pub compress: bool,
    pub history_api_fallback: bool,
    #[serde(rename = "static")]
    pub static_files: StaticOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticOptions {
    pub directory: PathBuf,
    pub serve_index: bool,
}
