//! Logging setup for the tscripts CLI.
//!
//! Verbosity is chosen in this order:
//! 1. `--verbose`: DEBUG for every tscripts crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. INFO for every tscripts crate
//!
//! ```rust,no_run
//! use tscripts_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("resolving environment");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "tscripts=debug,tscripts_cli=debug,tscripts_config=debug,tscripts_styles=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "tscripts=info,tscripts_cli=info,tscripts_config=info,tscripts_styles=info";

/// Pick the filter directives for the given flags.
pub fn filter_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

/// Install the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether stderr output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
