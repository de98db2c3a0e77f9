use clap::{Args, Subcommand};
use std::path::PathBuf;
use tscripts_config::{BuildSettings, PerformanceProfile};

use crate::cli::enums::*;
use crate::cli::validation::parse_global;

/// Bundler invoked when `--bundler` is not given.
pub const DEFAULT_BUNDLER: &str = "npx webpack";

/// Available tscripts subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the project once
    ///
    /// Resolves the build environment, synthesizes the bundler configuration
    /// for the chosen variant and hands it to the bundler. Stylesheet
    /// pipelines run afterwards when requested.
    Build(BuildArgs),

    /// Serve the application and rebuild on change
    ///
    /// Applications are handed to the bundler's dev server; UMD variants run
    /// the bundler in watch mode.
    Start(StartArgs),

    /// Print the synthesized configuration without running anything
    Config(ConfigArgs),

    /// Run only the stylesheet pipelines
    Styles(StylesArgs),
}

/// Flags that feed the build environment, shared by every command that
/// synthesizes a configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Build mode (development or production)
    ///
    /// Unrecognized values fall back to development with a warning.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Output directory, relative to the project root
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// URL prefix the emitted assets are served from
    #[arg(long, value_name = "URL")]
    pub public_path: Option<String>,

    /// Global name for UMD variants
    ///
    /// Defaults to `T` plus the PascalCase form of the scoped package name,
    /// e.g. `@acme/date-picker` becomes `TDatePicker`.
    #[arg(long, value_name = "NAME", value_parser = parse_global)]
    pub lib_name: Option<String>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Warn at 2 MiB instead of 5 MiB for application assets
    #[arg(long)]
    pub strict_performance: bool,

    /// Disable source maps in development
    #[arg(long)]
    pub no_source_map: bool,
}

impl EnvArgs {
    /// Project root as given, or the current directory.
    pub fn root(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// The CLI layer of the settings stack. Unset flags stay `None` so lower
    /// layers show through.
    pub fn to_settings(&self) -> BuildSettings {
        BuildSettings {
            mode: self.mode.clone(),
            lib_name: self.lib_name.clone(),
            output_path: self.out_dir.clone(),
            public_path: self.public_path.clone(),
            source_map: self.no_source_map.then_some(false),
            performance: self.strict_performance.then_some(PerformanceProfile::Strict),
            browserslist: None,
        }
    }
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Output shape to build
    #[arg(short = 't', long, value_enum, alias = "type", default_value = "app")]
    pub variant: VariantArg,

    /// Also run the LESS pipelines
    #[arg(long, value_enum, value_name = "PIPELINE")]
    pub styles: Option<StylesArg>,

    /// Also prefix and minify plain `.css` sources
    #[arg(long)]
    pub css: bool,

    /// Bundler command line
    #[arg(long, value_name = "COMMAND", default_value = DEFAULT_BUNDLER)]
    pub bundler: String,
}

/// Arguments for the start command
#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Output shape to build
    #[arg(short = 't', long, value_enum, alias = "type", default_value = "app")]
    pub variant: VariantArg,

    /// Watch the source tree and re-run these LESS pipelines on change
    #[arg(long, value_enum, value_name = "PIPELINE")]
    pub styles: Option<StylesArg>,

    /// Bundler command line
    #[arg(long, value_name = "COMMAND", default_value = DEFAULT_BUNDLER)]
    pub bundler: String,

    /// Debounce delay for stylesheet rebuilds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub debounce_ms: u64,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Output shape to synthesize
    #[arg(short = 't', long, value_enum, alias = "type", default_value = "app")]
    pub variant: VariantArg,

    /// Write the configuration to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the styles command
#[derive(Args, Debug)]
pub struct StylesArgs {
    /// Which LESS pipelines to run
    #[arg(short, long, value_enum, default_value = "all")]
    pub mode: StylesArg,

    /// Also prefix and minify plain `.css` sources
    #[arg(long)]
    pub css: bool,

    /// Keep running and rebuild on change
    #[arg(short, long)]
    pub watch: bool,

    /// Output directory, relative to the project root
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Debounce delay for rebuilds in watch mode
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub debounce_ms: u64,
}

impl StylesArgs {
    /// The environment flags this command understands.
    pub fn env(&self) -> EnvArgs {
        EnvArgs {
            out_dir: self.out_dir.clone(),
            cwd: self.cwd.clone(),
            ..EnvArgs::default()
        }
    }
}
