//! Formatting for sizes, durations and pipeline summaries.

use std::path::Path;
use std::time::Duration;

use owo_colors::{OwoColorize, Style};
use tscripts_config::{SizeSubject, SizeWarning};
use tscripts_styles::PipelineReport;

use super::paint;

/// Human-readable byte count.
///
/// ```
/// use tscripts_cli::ui::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KiB");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.00 MiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Human-readable duration (`50ms`, `1.50s`, `1m 30s`).
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    match ms {
        0..=999 => format!("{}ms", ms),
        1000..=59_999 => format!("{:.2}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}

/// One line per written file, relative to `root`, then a total.
pub fn print_style_summary(report: &PipelineReport, root: &Path) {
    let arrow = paint(Style::new().blue());
    let name = paint(Style::new().bright_white());
    let dim = paint(Style::new().dimmed());
    let green = paint(Style::new().green());

    for path in &report.written {
        let shown = path.strip_prefix(root).unwrap_or(path);
        eprintln!("  {} {}", "▸".style(arrow), shown.display().style(name));
    }
    eprintln!(
        "  {} {} file(s), {} → {} in {}",
        format!("[{}]", report.label).style(paint(Style::new().bold())),
        report.written.len(),
        format_size(report.bytes_in as u64).style(dim),
        format_size(report.bytes_out as u64).style(green),
        format_duration(report.duration).style(green)
    );
}

/// Describe a size threshold overrun.
pub fn describe_size_warning(name: &str, warning: &SizeWarning) -> String {
    let subject = match warning.subject {
        SizeSubject::Asset => "asset",
        SizeSubject::Entrypoint => "entrypoint",
    };
    format!(
        "{} {} is {} (limit {})",
        subject,
        name,
        format_size(warning.size),
        format_size(warning.limit)
    )
}
