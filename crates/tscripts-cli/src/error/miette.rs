//! Miette report conversion for CLI errors.

use ::miette::{miette, Report};

use crate::error::{BuildError, CliError, ConfigError, StyleError};

/// Convert a CliError into a miette Report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Styles(e) => style_error_to_miette(e),
        _ => miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidPackageName { name } => miette!(
            help = "UMD builds derive their global name from a scoped package name such as '@acme/my-widget', or set 'libName' explicitly",
            "Invalid package name '{}'",
            name
        ),
        other => miette!("Configuration error: {}", other),
    }
}

fn style_error_to_miette(err: StyleError) -> Report {
    match err {
        StyleError::OutputCollision {
            output,
            first,
            second,
        } => miette!(
            help = "rename one of the parent directories; nested stylesheets are flattened to their parent directory's name",
            "'{}' and '{}' would both be written to styles/{}",
            first,
            second,
            output
        ),
        other => miette!("Stylesheet error: {}", other),
    }
}

/// Convert a BuildError into a miette Report.
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::BundlerFailed { .. } => {
            // The bundler already printed its diagnostics.
            miette!("{}", err)
        }
        _ => miette!("Build error: {}", err),
    }
}
