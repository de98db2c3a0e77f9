//! `tscripts styles`: stylesheet pipelines only.

use tokio::signal;
use tscripts_config::BuildVariant;

use crate::cli::StylesArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use crate::watcher::StyleWatcher;

pub async fn execute(args: StylesArgs) -> Result<()> {
    let env = utils::resolve_environment(&args.env(), BuildVariant::App)?;
    let modes = args.mode.modes();

    utils::run_styles(&env, modes, args.css).await?;
    if !args.watch {
        return Ok(());
    }

    let (watcher, mut changes) = StyleWatcher::new(env.source_directory(), args.debounce_ms)?;
    ui::info(&format!("Watching {}", watcher.root().display()));
    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(change) = changes.recv() => {
                ui::info(&format!("Changed: {}", change.path().display()));
                if let Err(e) = utils::run_styles(&env, modes, args.css).await {
                    ui::error(&format!("Rebuild failed: {}", e));
                }
            }

            _ = signal::ctrl_c() => {
                break;
            }
        }
    }

    ui::success("Stopped watching");
    Ok(())
}
