//! Configuration synthesis.
//!
//! [`synthesize`] is a pure function of `(BuildEnvironment, BuildVariant)`:
//! it reads no files, touches no globals and always returns a fresh value.

mod app;
pub mod configuration;
pub mod loaders;
pub mod plugins;
mod umd;

pub use configuration::*;
pub use loaders::{LoaderFlags, Polyfills, StyleLanguage};

use std::collections::BTreeMap;

use crate::environment::BuildEnvironment;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::variant::BuildVariant;

pub const ENTRY: &str = "./src/index";
pub const STATS: &str = "errors-warnings";
pub const GLOBAL_OBJECT: &str = "this";
pub const MAIN_FIELDS: [&str; 4] = ["#source", "browser", "module", "main"];
pub const SOURCE_MAP_STYLE: &str = "source-map";

/// Compose the bundler configuration for `variant`.
///
/// # Errors
///
/// [`ConfigError::MissingLibraryName`] when a UMD variant is requested and
/// the environment carries no non-blank library name.
pub fn synthesize(env: &BuildEnvironment, variant: BuildVariant) -> Result<Configuration> {
    let compose: fn(&BuildEnvironment) -> Result<Configuration> = match variant {
        BuildVariant::App => app::compose,
        BuildVariant::UmdLibrary => umd::compose_library,
        BuildVariant::UmdTool => umd::compose_tool,
    };

    let config = compose(env)?;
    tracing::debug!(
        variant = %variant,
        mode = %env.mode,
        filename = %config.output.filename,
        "synthesized configuration"
    );
    Ok(config)
}

/// Entry and chunk file name templates.
///
/// Production names carry a 10-character content hash; development names
/// stay stable.
pub fn script_filenames(mode: Mode) -> (String, String) {
    if mode.is_production() {
        (
            "[name].[contenthash:10].js".to_string(),
            "[id].[contenthash:10].chunk.js".to_string(),
        )
    } else {
        ("[name].js".to_string(), "[name].chunk.js".to_string())
    }
}

fn library_name(env: &BuildEnvironment, variant: BuildVariant) -> Result<String> {
    env.library_name()
        .map(str::to_string)
        .ok_or(ConfigError::MissingLibraryName { variant })
}

/// Fields every variant shares. Variants then fill in rules, plugins and
/// their own output shape.
fn base(env: &BuildEnvironment, extensions: &[&str], filename: String) -> Configuration {
    let flags = LoaderFlags::from_environment(env);
    let production = env.mode.is_production();
    let (_, chunk_filename) = script_filenames(env.mode);

    Configuration {
        mode: env.mode,
        bail: production,
        devtool: if flags.maps_enabled() {
            Devtool::Style(SOURCE_MAP_STYLE.to_string())
        } else {
            Devtool::Disabled
        },
        stats: STATS.to_string(),
        entry: ENTRY.to_string(),
        output: OutputOptions {
            path: env.output_directory.clone(),
            public_path: env.public_path.clone(),
            filename,
            chunk_filename,
            global_object: GLOBAL_OBJECT.to_string(),
            library: None,
            clean: false,
        },
        module: ModuleOptions {
            strict_export_presence: true,
            rules: Vec::new(),
        },
        plugins: Vec::new(),
        resolve: ResolveOptions {
            main_fields: MAIN_FIELDS.iter().map(|s| s.to_string()).collect(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
        },
        externals: BTreeMap::new(),
        optimization: OptimizationOptions {
            minimize: production,
            minimizer: Vec::new(),
        },
        performance: PerformanceOptions::warn_above(WARN_FILE_SIZE),
        cache: None,
        dev_server: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib_env(mode: Mode) -> BuildEnvironment {
        BuildEnvironment::for_root("/project")
            .with_mode(mode)
            .with_library_name("TWidget")
    }

    #[test]
    fn shared_fields_hold_for_every_variant() {
        for variant in BuildVariant::ALL {
            for mode in [Mode::Development, Mode::Production] {
                let config = synthesize(&lib_env(mode), variant).unwrap();
                assert_eq!(config.mode, mode);
                assert_eq!(config.bail, mode.is_production());
                assert_eq!(config.optimization.minimize, mode.is_production());
                assert_eq!(config.entry, ENTRY);
                assert_eq!(config.stats, STATS);
                assert_eq!(config.output.global_object, "this");
                assert!(config.module.strict_export_presence);
                assert_eq!(config.resolve.main_fields[0], "#source");
                assert!(config.uses_loader("babel-loader"));
            }
        }
    }

    #[test]
    fn devtool_only_in_development() {
        let dev = synthesize(&lib_env(Mode::Development), BuildVariant::UmdTool).unwrap();
        let prod = synthesize(&lib_env(Mode::Production), BuildVariant::UmdTool).unwrap();
        assert_eq!(dev.devtool.style(), Some("source-map"));
        assert_eq!(prod.devtool, Devtool::Disabled);
    }

    #[test]
    fn development_source_maps_can_be_turned_off() {
        let mut env = lib_env(Mode::Development);
        env.source_maps = false;
        let config = synthesize(&env, BuildVariant::App).unwrap();
        assert_eq!(config.devtool, Devtool::Disabled);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["devtool"], false);
    }

    #[test]
    fn umd_variants_need_library_name() {
        let env = BuildEnvironment::for_root("/project");
        for variant in [BuildVariant::UmdLibrary, BuildVariant::UmdTool] {
            let err = synthesize(&env, variant).unwrap_err();
            assert!(matches!(err, ConfigError::MissingLibraryName { variant: v } if v == variant));
        }
        assert!(synthesize(&env, BuildVariant::App).is_ok());
    }

    #[test]
    fn blank_library_name_counts_as_missing() {
        let env = BuildEnvironment::for_root("/project").with_library_name("   ");
        assert!(synthesize(&env, BuildVariant::UmdLibrary).is_err());
    }

    #[test]
    fn chunk_names_follow_mode() {
        let (dev_entry, dev_chunk) = script_filenames(Mode::Development);
        let (prod_entry, prod_chunk) = script_filenames(Mode::Production);
        assert!(!dev_entry.contains("hash") && !dev_chunk.contains("hash"));
        assert!(prod_entry.contains("[contenthash:10]") && prod_chunk.contains("[contenthash:10]"));
    }

    #[test]
    fn synthesis_is_repeatable() {
        let env = lib_env(Mode::Production).with_env_var("API", "x");
        for variant in BuildVariant::ALL {
            assert_eq!(synthesize(&env, variant).unwrap(), synthesize(&env, variant).unwrap());
        }
    }
}
