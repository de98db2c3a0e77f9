//! tscripts CLI: resolve a front-end project's build environment, synthesize
//! its bundler configuration and hand it off.
//!
//! - [`cli`] - argument definitions
//! - `commands` - `build`, `start`, `config` and `styles`
//! - [`bundler`] - writing the configuration and running the bundler
//! - [`watcher`] - stylesheet watch mode
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines on stderr
//!
//! ```rust
//! use tscripts_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod bundler;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
