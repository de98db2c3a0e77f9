//! Command-line interface definition for tscripts.
//!
//! - `tscripts build` - synthesize and compile once
//! - `tscripts start` - synthesize and serve or watch
//! - `tscripts config` - print the synthesized configuration
//! - `tscripts styles` - stylesheet pipelines only

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{
    BuildArgs, Command, ConfigArgs, EnvArgs, StartArgs, StylesArgs, DEFAULT_BUNDLER,
};
pub use enums::*;
pub use validation::parse_global;

/// tscripts - bundler configuration and stylesheet tooling for front-end projects
#[derive(Parser, Debug)]
#[command(
    name = "tscripts",
    version,
    about = "Front-end build scripts: webpack configuration synthesis and LESS pipelines",
    long_about = "tscripts resolves a project's build environment from package.json, \
                  tscripts.config.json, TSCRIPTS_* variables and flags, synthesizes a \
                  bundler configuration for an application or a UMD bundle, and hands it \
                  to the bundler. It can also flatten and compile LESS sources."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
