//! Status lines on stderr.

use owo_colors::{OwoColorize, Style};

use super::paint;

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".style(paint(Style::new().green().bold())), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".style(paint(Style::new().blue().bold())), message);
}

pub fn warning(message: &str) {
    let yellow = paint(Style::new().yellow());
    eprintln!("{} {}", "⚠".style(paint(Style::new().yellow().bold())), message.style(yellow));
}

pub fn error(message: &str) {
    let red = paint(Style::new().red());
    eprintln!("{} {}", "✗".style(paint(Style::new().red().bold())), message.style(red));
}

/// Show the command about to be spawned.
pub fn command(program: &str, args: &[String]) {
    let dim = paint(Style::new().dimmed());
    eprintln!("{} {}", "$".style(dim), format!("{} {}", program, args.join(" ")).style(dim));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
        command("npx", &["webpack".to_string()]);
    }
}
