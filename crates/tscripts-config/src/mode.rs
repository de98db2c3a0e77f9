//! Build mode and its lenient string resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Build mode handed to the bundler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Parse a mode string strictly. Only `development` and `production`
    /// (surrounding whitespace ignored) are recognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "development" => Some(Mode::Development),
            "production" => Some(Mode::Production),
            _ => None,
        }
    }

    /// Resolve an optional mode string, falling back to development.
    ///
    /// Unrecognized values never produce an error; they are logged and
    /// replaced by the default.
    pub fn resolve(value: Option<&str>) -> Self {
        Self::first_valid(value)
    }

    /// The first recognized mode among `candidates`, highest precedence
    /// first. Each rejected value is logged; development when none parses.
    pub fn first_valid<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Self {
        for raw in candidates {
            match Self::parse(raw) {
                Some(mode) => return mode,
                None => tracing::warn!(value = raw, "unrecognized mode, ignoring it"),
            }
        }
        Mode::default()
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_values() {
        assert_eq!(Mode::resolve(Some("production")), Mode::Production);
        assert_eq!(Mode::resolve(Some(" development ")), Mode::Development);
    }

    #[test]
    fn unknown_values_fall_back_to_development() {
        assert_eq!(Mode::resolve(Some("staging")), Mode::Development);
        assert_eq!(Mode::resolve(Some("Production")), Mode::Development);
        assert_eq!(Mode::resolve(Some("")), Mode::Development);
        assert_eq!(Mode::resolve(None), Mode::Development);
    }

    #[test]
    fn first_valid_skips_rejected_values() {
        assert_eq!(
            Mode::first_valid(["prod", "PRODUCTION", "production"]),
            Mode::Production
        );
        assert_eq!(Mode::first_valid(["staging"]), Mode::Development);
        assert_eq!(Mode::first_valid(Vec::<&str>::new()), Mode::Development);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Mode::Production).unwrap(),
            serde_json::json!("production")
        );
    }
}
