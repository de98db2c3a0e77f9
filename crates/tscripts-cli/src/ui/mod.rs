//! Terminal output: status lines and summaries on stderr.
//!
//! Bundler output is passed through untouched, so everything here stays on
//! stderr and prints whole lines only.

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::Style;

pub use format::{describe_size_warning, format_duration, format_size, print_style_summary};
pub use messages::{command, error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status lines are colored.
///
/// `--no-color` and `NO_COLOR` turn colors off; `FORCE_COLOR` forces them.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

/// `style` when colors are on, a plain style otherwise.
pub(crate) fn paint(style: Style) -> Style {
    if COLORS.load(Ordering::Relaxed) {
        style
    } else {
        Style::new()
    }
}
