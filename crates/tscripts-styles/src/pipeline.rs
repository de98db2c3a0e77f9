//! Stylesheet pipelines: copy, compiled and plain CSS.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tscripts_config::BuildEnvironment;

use crate::error::{Result, StyleError};
use crate::flatten::with_extension;
use crate::imports::rewrite_imports;
use crate::postprocess::{finish_css, CssOptions};
use crate::preprocess::{LessCompiler, Preprocessor};
use crate::stylesheet::StylesheetFile;
use crate::tree::{discover, write_atomic};

/// How LESS sources reach the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleMode {
    /// Relocate and rewrite imports; content otherwise untouched.
    Copy,
    /// Compile, prefix and minify into `.css`.
    Compiled,
}

impl StyleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleMode::Copy => "copy",
            StyleMode::Compiled => "compiled",
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transformed stylesheet ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedStylesheet {
    pub original_path: String,
    /// Flattened path, identical for every mode.
    pub relocated_path: String,
    /// Path actually written, relative to the output root.
    pub output_path: String,
    pub content: String,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub label: &'static str,
    pub written: Vec<PathBuf>,
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub duration: Duration,
}

/// Fail when two inputs would be written to the same output path.
pub fn check_collisions<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (output, original) in pairs {
        if let Some(first) = seen.insert(output, original) {
            return Err(StyleError::OutputCollision {
                output: output.to_string(),
                first: first.to_string(),
                second: original.to_string(),
            });
        }
    }
    Ok(())
}

/// LESS pipeline from a source root into the styles output root.
#[derive(Clone)]
pub struct StylePipeline {
    source_root: PathBuf,
    output_root: PathBuf,
    css: CssOptions,
    preprocessor: Arc<dyn Preprocessor>,
}

impl fmt::Debug for StylePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylePipeline")
            .field("source_root", &self.source_root)
            .field("output_root", &self.output_root)
            .field("css", &self.css)
            .field("preprocessor", &self.preprocessor.name())
            .finish()
    }
}

impl StylePipeline {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            css: CssOptions::default(),
            preprocessor: Arc::new(LessCompiler::default()),
        }
    }

    /// `<root>/src` into `<output>/styles`, prefixing for the environment's
    /// browserslist and handing its variables to the LESS compiler.
    pub fn for_environment(env: &BuildEnvironment) -> Self {
        Self::new(env.source_directory(), env.styles_directory())
            .with_css_options(CssOptions::new().with_targets(env.browserslist.clone()))
            .with_preprocessor(LessCompiler::new().with_env(env.extra_env_vars.clone()))
    }

    pub fn with_css_options(mut self, css: CssOptions) -> Self {
        self.css = css;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessor = Arc::new(preprocessor);
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Transform files without touching the output tree.
    pub fn process(&self, files: &[StylesheetFile], mode: StyleMode) -> Result<Vec<ProcessedStylesheet>> {
        let relocated: Vec<String> = files.iter().map(StylesheetFile::relocated_path).collect();
        check_collisions(
            relocated
                .iter()
                .map(String::as_str)
                .zip(files.iter().map(|f| f.original_path.as_str())),
        )?;

        files
            .par_iter()
            .zip(relocated.into_par_iter())
            .map(|(file, relocated_path)| self.process_one(file, relocated_path, mode))
            .collect()
    }

    fn process_one(
        &self,
        file: &StylesheetFile,
        relocated_path: String,
        mode: StyleMode,
    ) -> Result<ProcessedStylesheet> {
        let (output_path, content) = match mode {
            StyleMode::Copy => (
                relocated_path.clone(),
                rewrite_imports(&file.content).into_owned(),
            ),
            StyleMode::Compiled => {
                let source_path = self.source_root.join(&file.original_path);
                let css = self.preprocessor.compile(&source_path, &file.content)?;
                (
                    with_extension(&relocated_path, "css"),
                    finish_css(&source_path, &css, &self.css)?,
                )
            }
        };

        Ok(ProcessedStylesheet {
            original_path: file.original_path.clone(),
            relocated_path,
            output_path,
            content,
        })
    }

    /// Discover, transform and write every `.less` file.
    pub fn run(&self, mode: StyleMode) -> Result<PipelineReport> {
        let start = Instant::now();
        let files = discover(&self.source_root, "less")?;
        let processed = self.process(&files, mode)?;
        let written = write_all(&self.output_root, &processed)?;

        let report = PipelineReport {
            label: mode.as_str(),
            written,
            bytes_in: files.iter().map(|f| f.content.len()).sum(),
            bytes_out: processed.iter().map(|p| p.content.len()).sum(),
            duration: start.elapsed(),
        };
        tracing::info!(
            mode = %mode,
            files = report.written.len(),
            output = %self.output_root.display(),
            "stylesheets written"
        );
        Ok(report)
    }
}

fn write_all(output_root: &Path, processed: &[ProcessedStylesheet]) -> Result<Vec<PathBuf>> {
    processed
        .par_iter()
        .map(|p| {
            let target = output_root.join(&p.output_path);
            write_atomic(&target, &p.content)?;
            Ok(target)
        })
        .collect()
}

/// Plain `.css` pipeline: prefix and minify, keeping relative paths.
#[derive(Debug, Clone)]
pub struct CssPipeline {
    source_root: PathBuf,
    output_root: PathBuf,
    css: CssOptions,
}

impl CssPipeline {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            css: CssOptions::default(),
        }
    }

    /// `<root>/src` into the output root.
    pub fn for_environment(env: &BuildEnvironment) -> Self {
        Self::new(env.source_directory(), env.output_directory.clone())
            .with_css_options(CssOptions::new().with_targets(env.browserslist.clone()))
    }

    pub fn with_css_options(mut self, css: CssOptions) -> Self {
        self.css = css;
        self
    }

    pub fn process(&self, files: &[StylesheetFile]) -> Result<Vec<ProcessedStylesheet>> {
        files
            .par_iter()
            .map(|file| {
                let source_path = self.source_root.join(&file.original_path);
                Ok(ProcessedStylesheet {
                    original_path: file.original_path.clone(),
                    relocated_path: file.original_path.clone(),
                    output_path: file.original_path.clone(),
                    content: finish_css(&source_path, &file.content, &self.css)?,
                })
            })
            .collect()
    }

    pub fn run(&self) -> Result<PipelineReport> {
        let start = Instant::now();
        let files = discover(&self.source_root, "css")?;
        let processed = self.process(&files)?;
        let written = write_all(&self.output_root, &processed)?;

        let report = PipelineReport {
            label: "css",
            written,
            bytes_in: files.iter().map(|f| f.content.len()).sum(),
            bytes_out: processed.iter().map(|p| p.content.len()).sum(),
            duration: start.elapsed(),
        };
        tracing::info!(files = report.written.len(), "css written");
        Ok(report)
    }
}
