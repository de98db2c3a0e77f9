//! Command implementations.
//!
//! - [`build`] - compile once
//! - [`start`] - dev server or watch mode
//! - [`config`] - print the synthesized configuration
//! - [`styles`] - stylesheet pipelines
//!
//! Each module exposes an `execute` function taking the parsed arguments.

pub mod build;
pub mod config;
pub mod start;
pub mod styles;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use config::execute as config_execute;
pub use start::execute as start_execute;
pub use styles::execute as styles_execute;
