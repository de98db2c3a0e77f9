//! Environment Resolver: normalized inputs for one synthesis run.
//!
//! Precedence, lowest to highest:
//! defaults < `package.json` block < `tscripts.config.json` < `TSCRIPTS_*`
//! environment variables < CLI overrides.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Format as _, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::env_file;
use crate::error::{ConfigError, Result};
use crate::library_name::derive_library_name;
use crate::mode::Mode;
use crate::package::PackageManifest;
use crate::variant::BuildVariant;

/// Optional project-level config file, merged above the `package.json` block.
pub const CONFIG_FILE_NAME: &str = "tscripts.config.json";

/// Cache location relative to the project root.
pub const CACHE_DIR: &str = "node_modules/.cache/tscripts";

pub const DEFAULT_OUTPUT_PATH: &str = "dist";
pub const DEFAULT_PUBLIC_PATH: &str = "/";
pub const DEFAULT_BROWSERSLIST: &str = "> 0.01%";

/// Size-warning profile for emitted assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceProfile {
    #[default]
    Default,
    Strict,
}

/// One layer of user-supplied build settings.
///
/// Every field is optional so layers only override what they set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browserslist: Option<String>,
}

impl BuildSettings {
    /// Read the `TSCRIPTS_*` overrides out of an environment snapshot.
    pub fn from_env_vars(vars: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();
        Self {
            mode: get("TSCRIPTS_MODE"),
            lib_name: get("TSCRIPTS_LIB_NAME"),
            output_path: get("TSCRIPTS_OUTPUT_PATH").map(PathBuf::from),
            public_path: get("TSCRIPTS_PUBLIC_PATH"),
            ..Self::default()
        }
    }
}

/// Normalized, immutable inputs for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEnvironment {
    pub mode: Mode,
    pub project_root: PathBuf,
    pub output_directory: PathBuf,
    pub public_path: String,
    pub package_name: Option<String>,
    pub library_name: Option<String>,
    pub cache_directory: PathBuf,
    pub source_maps: bool,
    pub performance: PerformanceProfile,
    pub browserslist: String,
    pub extra_env_vars: BTreeMap<String, String>,
}

impl BuildEnvironment {
    /// An environment with every default applied, rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            mode: Mode::default(),
            output_directory: root.join(DEFAULT_OUTPUT_PATH),
            cache_directory: root.join(CACHE_DIR),
            project_root: root,
            public_path: DEFAULT_PUBLIC_PATH.to_string(),
            package_name: None,
            library_name: None,
            source_maps: true,
            performance: PerformanceProfile::default(),
            browserslist: DEFAULT_BROWSERSLIST.to_string(),
            extra_env_vars: BTreeMap::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = Some(name.into());
        self
    }

    pub fn with_performance(mut self, profile: PerformanceProfile) -> Self {
        self.performance = profile;
        self
    }

    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env_vars.insert(key.into(), value.into());
        self
    }

    /// The library name if present and non-blank.
    pub fn library_name(&self) -> Option<&str> {
        self.library_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Stylesheet output root (`<outputDirectory>/styles`).
    pub fn styles_directory(&self) -> PathBuf {
        self.output_directory.join("styles")
    }

    /// Stylesheet source root (`<projectRoot>/src`).
    pub fn source_directory(&self) -> PathBuf {
        self.project_root.join("src")
    }
}

/// Raw inputs for [`EnvironmentResolver`].
#[derive(Debug, Clone, Default)]
pub struct ResolveInputs {
    /// Project root; relative paths resolve against the working directory.
    pub root: PathBuf,
    /// Highest-precedence layer (CLI flags).
    pub overrides: BuildSettings,
    /// Snapshot of the process environment.
    pub process_env: BTreeMap<String, String>,
}

impl ResolveInputs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_overrides(mut self, overrides: BuildSettings) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_process_env(mut self, vars: BTreeMap<String, String>) -> Self {
        self.process_env = vars;
        self
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture_process_env(self) -> Self {
        self.with_process_env(utf8_vars(std::env::vars_os()))
    }
}

fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Builds a [`BuildEnvironment`] from layered inputs.
pub struct EnvironmentResolver {
    inputs: ResolveInputs,
}

impl EnvironmentResolver {
    pub fn new(inputs: ResolveInputs) -> Self {
        Self { inputs }
    }

    /// Resolve the environment for `variant`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPackageName`] when a library variant has no
    ///   explicit name and the package name is not scoped.
    /// - [`ConfigError::MissingLibraryName`] when a library variant has
    ///   neither an explicit name nor a package name.
    /// - [`ConfigError::MissingRequiredField`] when the project root cannot
    ///   be made absolute.
    /// - [`ConfigError::InvalidValue`] for malformed layers.
    pub fn resolve(&self, variant: BuildVariant) -> Result<BuildEnvironment> {
        let root = self.absolute_root(variant)?;
        let manifest = PackageManifest::load(&root)?.unwrap_or_default();
        let layers = self.layers(&root, &manifest)?;
        let settings = self.merge_settings(&layers)?;

        // An unrecognized mode in one layer falls through to the layers below.
        let mode = Mode::first_valid(layers.iter().rev().filter_map(|l| l.mode.as_deref()));
        let output_directory = root.join(
            settings
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        );
        let public_path = settings
            .public_path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PUBLIC_PATH.to_string());

        let explicit_name = settings.lib_name.filter(|n| !n.trim().is_empty());
        let library_name = match explicit_name {
            Some(name) => Some(name),
            None if variant.requires_library_name() => match manifest.name.as_deref() {
                Some(package_name) => Some(derive_library_name(package_name)?),
                None => return Err(ConfigError::MissingLibraryName { variant }),
            },
            None => None,
        };

        let file_vars = env_file::load(&root)?;
        let extra_env_vars = env_file::merge_under(file_vars, &self.inputs.process_env);

        let env = BuildEnvironment {
            mode,
            output_directory,
            public_path,
            package_name: manifest.name,
            library_name,
            cache_directory: root.join(CACHE_DIR),
            source_maps: settings.source_map.unwrap_or(true),
            performance: settings.performance.unwrap_or_default(),
            browserslist: settings
                .browserslist
                .unwrap_or_else(|| DEFAULT_BROWSERSLIST.to_string()),
            extra_env_vars,
            project_root: root,
        };

        tracing::debug!(
            mode = %env.mode,
            variant = %variant,
            output = %env.output_directory.display(),
            "resolved build environment"
        );
        Ok(env)
    }

    fn absolute_root(&self, variant: BuildVariant) -> Result<PathBuf> {
        let root = &self.inputs.root;
        if root.is_absolute() {
            return Ok(root.clone());
        }
        let cwd = std::env::current_dir().map_err(|e| ConfigError::MissingRequiredField {
            variant,
            field: "outputDirectory".to_string(),
            hint: format!("working directory is unavailable: {}", e),
        })?;
        Ok(cwd.join(root))
    }

    /// Settings layers, lowest precedence first.
    fn layers(&self, root: &Path, manifest: &PackageManifest) -> Result<Vec<BuildSettings>> {
        let mut layers = vec![BuildSettings::default()];

        if let Some(block) = &manifest.build {
            layers.push(block.clone());
        }

        let config_file = root.join(CONFIG_FILE_NAME);
        if config_file.exists() {
            let file_layer = Figment::from(Json::file(config_file))
                .extract()
                .map_err(|e| ConfigError::InvalidValue {
                    field: CONFIG_FILE_NAME.to_string(),
                    hint: e.to_string(),
                })?;
            layers.push(file_layer);
        }

        layers.push(BuildSettings::from_env_vars(&self.inputs.process_env));
        layers.push(self.inputs.overrides.clone());
        Ok(layers)
    }

    fn merge_settings(&self, layers: &[BuildSettings]) -> Result<BuildSettings> {
        layers
            .iter()
            .fold(Figment::new(), |figment, layer| {
                figment.merge(Serialized::defaults(layer))
            })
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "configuration".to_string(),
                hint: e.to_string(),
            })
    }
}
