//! `tscripts build`: synthesize once and compile once.

use std::time::Instant;

use tscripts_config::{derive_key, synthesize, BuildVariant};

use crate::bundler::{self, Bundler, ExternalBundler};
use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// 1. Resolve the environment (flags > env vars > config file > package.json)
/// 2. Synthesize the configuration for the variant
/// 3. Write it under the cache directory and run the bundler
/// 4. Warn about outputs above the performance thresholds
/// 5. Run the requested stylesheet pipelines
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();
    let variant = BuildVariant::from(args.variant);

    let env = utils::resolve_environment(&args.env, variant)?;
    let config = synthesize(&env, variant)?;
    let key = derive_key(&env);

    ui::info(&format!(
        "Building {} in {} mode (cache {})",
        variant,
        env.mode,
        key.short(12)
    ));

    let config_path = bundler::write_config(
        &config,
        &env.cache_directory,
        &utils::config_stem(variant, env.mode),
    )?;
    let bundler = ExternalBundler::parse(&args.bundler, &env.project_root)?;
    bundler.compile(&config_path).await?;

    for (name, warning) in utils::oversized_outputs(&config, &env.output_directory)? {
        ui::warning(&ui::describe_size_warning(&name, &warning));
    }

    let modes = args.styles.map(|s| s.modes()).unwrap_or_default();
    if !modes.is_empty() || args.css {
        utils::run_styles(&env, modes, args.css).await?;
    }

    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}
