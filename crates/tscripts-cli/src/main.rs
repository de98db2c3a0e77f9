//! Entry point for the `tscripts` binary.

use clap::Parser;
use miette::Result;
use tscripts_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Start(start_args) => commands::start_execute(start_args).await,
        cli::Command::Config(config_args) => commands::config_execute(config_args).await,
        cli::Command::Styles(styles_args) => commands::styles_execute(styles_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
