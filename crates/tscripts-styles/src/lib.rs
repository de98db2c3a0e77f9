//! Stylesheet relocation and processing.
//!
//! LESS sources under `src/` are flattened into a single-level `styles/`
//! directory (`component/button/index.less` → `button.less`). Two modes
//! produce output at the same relocated path:
//!
//! - **copy**: imports are rewritten to match the flattened layout, content is
//!   otherwise untouched;
//! - **compiled**: the external LESS compiler runs, then lightningcss adds
//!   vendor prefixes for the browserslist targets and minifies into `.css`.
//!
//! Plain `.css` sources go through [`CssPipeline`], which prefixes and
//! minifies while keeping their relative paths.
//!
//! ```
//! use tscripts_styles::{flatten, rewrite, StylesheetFile};
//!
//! assert_eq!(flatten("component/button/index.less"), "button.less");
//!
//! let out = rewrite(&[StylesheetFile::new("button/index.less", "@import '../shared/index.less';")]);
//! assert_eq!(out[0], ("button.less".to_string(), "@import 'shared.less';".to_string()));
//! ```

pub mod error;
pub mod flatten;
pub mod imports;
pub mod pipeline;
pub mod postprocess;
pub mod preprocess;
pub mod stylesheet;
pub mod tree;

pub use error::{Result, StyleError};
pub use flatten::flatten;
pub use imports::{rewrite_imports, rewrite_reference};
pub use pipeline::{
    check_collisions, CssPipeline, PipelineReport, ProcessedStylesheet, StyleMode, StylePipeline,
};
pub use postprocess::{finish_css, CssOptions};
pub use preprocess::{LessCompiler, Passthrough, Preprocessor};
pub use stylesheet::{rewrite, StylesheetFile};
pub use tree::{discover, write_atomic};
