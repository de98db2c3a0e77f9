//! `tscripts config`: print the synthesized configuration.

use tscripts_config::{derive_key, synthesize, BuildVariant};

use crate::bundler::write_atomic;
use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Resolve and synthesize without running anything.
///
/// The JSON goes to stdout (or `--output`); the cache key goes to stderr so
/// stdout stays machine-readable.
pub async fn execute(args: ConfigArgs) -> Result<()> {
    let variant = BuildVariant::from(args.variant);
    let env = utils::resolve_environment(&args.env, variant)?;
    let config = synthesize(&env, variant)?;
    let json = config.to_json_pretty()?;

    match &args.output {
        Some(path) => {
            write_atomic(path, &json)?;
            ui::success(&format!("Configuration written to {}", path.display()));
        }
        None => println!("{}", json),
    }

    ui::info(&format!("cache key {}", derive_key(&env).as_hex()));
    Ok(())
}
