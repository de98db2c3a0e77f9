use clap::ValueEnum;
use tscripts_config::BuildVariant;
use tscripts_styles::StyleMode;

/// Output shape to synthesize.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum VariantArg {
    /// Standalone application with the full asset pipeline
    #[default]
    #[value(name = "app")]
    App,

    /// UMD library; React stays external
    #[value(name = "umd-library", alias = "umd-lib")]
    UmdLibrary,

    /// Self-contained UMD tool
    #[value(name = "umd-tool", alias = "umd")]
    UmdTool,
}

impl From<VariantArg> for BuildVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::App => BuildVariant::App,
            VariantArg::UmdLibrary => BuildVariant::UmdLibrary,
            VariantArg::UmdTool => BuildVariant::UmdTool,
        }
    }
}

/// Which stylesheet pipelines to run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum StylesArg {
    /// Flatten and rewrite imports; sources stay LESS
    #[value(name = "copy")]
    Copy,

    /// Compile LESS to prefixed, minified CSS
    #[value(name = "compiled")]
    Compiled,

    /// Both copy and compiled outputs
    #[value(name = "all")]
    All,
}

impl StylesArg {
    pub fn modes(self) -> &'static [StyleMode] {
        match self {
            StylesArg::Copy => &[StyleMode::Copy],
            StylesArg::Compiled => &[StyleMode::Compiled],
            StylesArg::All => &[StyleMode::Copy, StyleMode::Compiled],
        }
    }
}
