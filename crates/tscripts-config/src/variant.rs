//! Build variants selectable from the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output shape the synthesizer composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildVariant {
    /// Standalone application with the full asset pipeline.
    App,
    /// UMD library with the host's UI framework left external.
    UmdLibrary,
    /// Self-contained UMD tool.
    UmdTool,
}

impl BuildVariant {
    pub const ALL: [BuildVariant; 3] = [
        BuildVariant::App,
        BuildVariant::UmdLibrary,
        BuildVariant::UmdTool,
    ];

    /// Whether the variant exports a named global and therefore needs a
    /// library name.
    pub fn requires_library_name(self) -> bool {
        matches!(self, BuildVariant::UmdLibrary | BuildVariant::UmdTool)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildVariant::App => "app",
            BuildVariant::UmdLibrary => "umd-library",
            BuildVariant::UmdTool => "umd-tool",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "app" => Ok(BuildVariant::App),
            "umd-library" | "umd-lib" => Ok(BuildVariant::UmdLibrary),
            "umd-tool" | "umd" => Ok(BuildVariant::UmdTool),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}
