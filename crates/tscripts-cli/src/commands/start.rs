//! `tscripts start`: hand the configuration to the bundler's dev server or
//! watch mode, optionally rebuilding stylesheets alongside.

use tokio::signal;
use tscripts_config::{synthesize, BuildVariant};

use crate::bundler::{self, Bundler, ExternalBundler};
use crate::cli::StartArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use crate::watcher::{next_change, StyleWatcher};

pub async fn execute(args: StartArgs) -> Result<()> {
    let variant = BuildVariant::from(args.variant);
    let env = utils::resolve_environment(&args.env, variant)?;
    let config = synthesize(&env, variant)?;

    let config_path = bundler::write_config(
        &config,
        &env.cache_directory,
        &utils::config_stem(variant, env.mode),
    )?;
    let bundler = ExternalBundler::parse(&args.bundler, &env.project_root)?;

    let modes = args.styles.map(|s| s.modes()).unwrap_or_default();
    let mut watcher = None;
    if !modes.is_empty() {
        utils::run_styles(&env, modes, false).await?;
        let (style_watcher, rx) = StyleWatcher::new(env.source_directory(), args.debounce_ms)?;
        ui::info(&format!(
            "Watching stylesheets in {}",
            style_watcher.root().display()
        ));
        watcher = Some((style_watcher, rx));
    }

    let serve = variant == BuildVariant::App;
    let running = bundler.watch(&config_path, serve);
    tokio::pin!(running);

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            result = &mut running => {
                return result;
            }

            Some(change) = next_change(watcher.as_mut().map(|(_, rx)| rx)) => {
                ui::info(&format!("Stylesheet changed: {}", change.path().display()));
                if let Err(e) = utils::run_styles(&env, modes, false).await {
                    ui::error(&format!("Stylesheet rebuild failed: {}", e));
                }
            }

            _ = signal::ctrl_c() => {
                ui::info("Stopping...");
                break;
            }
        }
    }

    ui::success("Stopped");
    Ok(())
}
