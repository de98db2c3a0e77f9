//! Vendor prefixing and minification with lightningcss.

use std::path::Path;

use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
    targets::{Browsers, Targets},
};

use crate::error::{Result, StyleError};

/// Options for the CSS finishing pass.
#[derive(Debug, Clone)]
pub struct CssOptions {
    /// Collapse whitespace and merge rules.
    pub minify: bool,

    /// Browserslist query that decides which vendor prefixes are emitted.
    /// `None` leaves the CSS unprefixed.
    pub targets: Option<String>,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            minify: true,
            targets: None,
        }
    }
}

impl CssOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn with_targets(mut self, query: impl Into<String>) -> Self {
        self.targets = Some(query.into());
        self
    }

    /// Resolve the browserslist query.
    pub fn resolve_targets(&self) -> Result<Targets> {
        let Some(query) = self.targets.as_deref() else {
            return Ok(Targets::default());
        };
        let browsers = Browsers::from_browserslist([query]).map_err(|e| StyleError::Targets {
            query: query.to_string(),
            message: e.to_string(),
        })?;
        Ok(Targets {
            browsers,
            ..Targets::default()
        })
    }
}

/// Prefix and minify one stylesheet.
pub fn finish_css(path: &Path, source: &str, options: &CssOptions) -> Result<String> {
    let targets = options.resolve_targets()?;
    let css_error = |message: String| StyleError::Css {
        path: path.to_path_buf(),
        message,
    };

    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: path.to_string_lossy().to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| css_error(e.to_string()))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| css_error(e.to_string()))?;

    let output = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| css_error(e.to_string()))?;

    Ok(output.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifies_by_default() {
        let css = "body {\n  color: red;\n  background: blue;\n}";
        let out = finish_css(Path::new("a.css"), css, &CssOptions::new()).unwrap();
        assert!(out.len() < css.len());
        assert!(out.contains("color"));
        assert!(out.contains("background"));
    }

    #[test]
    fn prefixes_for_old_safari() {
        let options = CssOptions::new().with_targets("safari >= 9");
        let out = finish_css(Path::new("a.css"), ".a { user-select: none; }", &options).unwrap();
        assert!(out.contains("-webkit-user-select"), "{out}");
    }

    #[test]
    fn pretty_output_when_minify_disabled() {
        let options = CssOptions::new().with_minify(false);
        let out = finish_css(Path::new("a.css"), ".a{color:red}", &options).unwrap();
        assert!(out.contains('\n'));
    }

    #[test]
    fn rejects_unknown_query() {
        let options = CssOptions::new().with_targets("not-a-browser >= 1");
        assert!(matches!(
            options.resolve_targets(),
            Err(StyleError::Targets { .. })
        ));
    }
}
