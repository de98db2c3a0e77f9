//! Build environment resolution and bundler configuration synthesis.
//!
//! The pipeline is leaf-first:
//!
//! 1. [`EnvironmentResolver`] turns CLI overrides, `package.json`, an optional
//!    `tscripts.config.json`, the process environment and `.env` into an
//!    immutable [`BuildEnvironment`].
//! 2. [`derive_key`] hashes that environment into a [`CacheKey`].
//! 3. [`derive_library_name`] turns a scoped package name into the UMD global.
//! 4. [`synthesize`] composes a full [`Configuration`] for a [`BuildVariant`].
//!
//! ```
//! use tscripts_config::{synthesize, BuildEnvironment, BuildVariant, Mode};
//!
//! let env = BuildEnvironment::for_root("/project").with_mode(Mode::Production);
//! let config = synthesize(&env, BuildVariant::App).unwrap();
//! assert!(config.bail);
//! assert!(config.optimization.minimize);
//! ```

pub mod cache_key;
pub mod env_file;
pub mod environment;
pub mod error;
pub mod library_name;
pub mod mode;
pub mod package;
pub mod synth;
pub mod variant;

pub use cache_key::{derive_key, CacheKey};
pub use environment::{
    BuildEnvironment, BuildSettings, EnvironmentResolver, PerformanceProfile, ResolveInputs,
};
pub use error::{ConfigError, Result};
pub use library_name::derive_library_name;
pub use mode::Mode;
pub use package::PackageManifest;
pub use synth::*;
pub use variant::BuildVariant;
