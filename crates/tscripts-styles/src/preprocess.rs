//! LESS compilation through an external compiler process.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, StyleError};

/// Turns a source stylesheet into plain CSS.
pub trait Preprocessor: Send + Sync {
    fn name(&self) -> &str;

    /// Compile `source`, which was read from `path`. Relative imports resolve
    /// against the directory containing `path`.
    fn compile(&self, path: &Path, source: &str) -> Result<String>;
}

/// Runs `lessc` (through `npx` by default), feeding the source on stdin.
///
/// Environment variables are handed to the child process only; the calling
/// process environment is never modified.
#[derive(Debug, Clone)]
pub struct LessCompiler {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl Default for LessCompiler {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["lessc".to_string()],
            env: BTreeMap::new(),
        }
    }
}

impl LessCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable, e.g. a globally installed `lessc`.
    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

impl Preprocessor for LessCompiler {
    fn name(&self) -> &str {
        "lessc"
    }

    fn compile(&self, path: &Path, source: &str) -> Result<String> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(["--js", "-"])
            .current_dir(dir)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| StyleError::PreprocessorUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(StyleError::io(path))?;
        }

        let output = child.wait_with_output().map_err(StyleError::io(path))?;
        if !output.status.success() {
            return Err(StyleError::Preprocess {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(path = %path.display(), "compiled less");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Returns the source unchanged. Used for plain CSS and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Preprocessor for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn compile(&self, _path: &Path, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_returns_source() {
        let out = Passthrough.compile(Path::new("a.less"), ".a{}").unwrap();
        assert_eq!(out, ".a{}");
    }

    #[test]
    fn missing_program_is_reported() {
        let compiler = LessCompiler::new().with_command("tscripts-no-such-lessc", Vec::new());
        let err = compiler.compile(Path::new("a.less"), ".a{}").unwrap_err();
        assert!(matches!(err, StyleError::PreprocessorUnavailable { ref program, .. } if program == "tscripts-no-such-lessc"));
    }

    #[cfg(unix)]
    #[test]
    fn env_reaches_child_only() {
        // `sh -c` stands in for the compiler: it prints a variable set only
        // on the child.
        let compiler = LessCompiler::new()
            .with_command(
                "sh",
                vec!["-c".to_string(), "cat >/dev/null; printf %s \"$TSCRIPTS_THEME\"".to_string()],
            )
            .with_env(BTreeMap::from([("TSCRIPTS_THEME".to_string(), "dark".to_string())]));
        let out = compiler.compile(Path::new("a.less"), ".a{}").unwrap();
        assert_eq!(out, "dark");
        assert!(std::env::var("TSCRIPTS_THEME").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn failing_compiler_surfaces_stderr() {
        let compiler = LessCompiler::new().with_command(
            "sh",
            vec!["-c".to_string(), "cat >/dev/null; echo boom >&2; exit 1".to_string()],
        );
        let err = compiler.compile(Path::new("a.less"), ".a{}").unwrap_err();
        assert!(matches!(err, StyleError::Preprocess { ref message, .. } if message == "boom"));
    }
}
