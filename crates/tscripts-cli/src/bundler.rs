//! Hand-off to the external bundler.
//!
//! The synthesized [`Configuration`] is written as JSON under the cache
//! directory next to a small CommonJS loader. The loader turns rule patterns
//! into `RegExp`s and plugin specs into plugin instances, so the bundler can
//! consume it with `--config`. The bundler's output is passed through
//! untouched.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tscripts_config::Configuration;

use crate::error::{BuildError, Result};
use crate::ui;

/// Materializes the JSON configuration for webpack. `__CONFIG_JSON__` is
/// replaced with the JSON file name.
const CONFIG_LOADER: &str = r#"// Generated by tscripts; rewritten on every run.
const webpack = require('webpack');
const config = require('./__CONFIG_JSON__');

const pattern = (value) => (typeof value === 'string' ? new RegExp(value) : value);

const instantiate = ({ name, options }) => {
  if (typeof webpack[name] === 'function') return new webpack[name](options);
  const Plugin = require(name);
  return new (Plugin.default || Plugin)(options);
};

const loader = (spec) =>
  spec.loader === 'mini-css-extract-plugin/loader'
    ? { ...spec, loader: require('mini-css-extract-plugin').loader }
    : spec;

for (const group of config.module.rules) {
  for (const rule of group.oneOf) {
    rule.test = pattern(rule.test);
    if (rule.exclude) rule.exclude = pattern(rule.exclude);
    if (rule.use) rule.use = rule.use.map(loader);
  }
}
config.plugins = config.plugins.map(instantiate);
config.optimization.minimizer = config.optimization.minimizer.map(instantiate);

module.exports = config;
"#;

/// An external program that compiles a configuration file.
#[async_trait]
pub trait Bundler: Send + Sync {
    fn name(&self) -> &str;

    /// Compile once and wait for the bundler to exit.
    async fn compile(&self, config: &Path) -> Result<()>;

    /// Run until interrupted. `serve` selects the dev server over plain
    /// watch mode.
    async fn watch(&self, config: &Path, serve: bool) -> Result<()>;
}

/// A bundler started as a child process, e.g. `npx webpack`.
#[derive(Debug, Clone)]
pub struct ExternalBundler {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl ExternalBundler {
    /// Split a command line on whitespace. The bundler runs in `cwd`.
    pub fn parse(command_line: &str, cwd: impl Into<PathBuf>) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| BuildError::InvalidCommand(command_line.to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
            cwd: cwd.into(),
        })
    }

    fn arguments(&self, leading: &[&str], config: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        args.extend(leading.iter().map(|s| s.to_string()));
        args.push("--config".to_string());
        args.push(config.display().to_string());
        args
    }

    async fn run(&self, args: Vec<String>) -> Result<()> {
        ui::command(&self.program, &args);
        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| BuildError::BundlerUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::BundlerFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                code: status.code(),
            }
            .into())
        }
    }
}

#[async_trait]
impl Bundler for ExternalBundler {
    fn name(&self) -> &str {
        &self.program
    }

    async fn compile(&self, config: &Path) -> Result<()> {
        self.run(self.arguments(&[], config)).await
    }

    async fn watch(&self, config: &Path, serve: bool) -> Result<()> {
        let leading: &[&str] = if serve { &["serve"] } else { &["--watch"] };
        self.run(self.arguments(leading, config)).await
    }
}

/// Write `config` as `<dir>/<stem>.json` plus its loader `<dir>/<stem>.config.cjs`.
///
/// Returns the loader path, which is what the bundler receives.
pub fn write_config(config: &Configuration, dir: &Path, stem: &str) -> Result<PathBuf> {
    let json_name = format!("{}.json", stem);
    let json_path = dir.join(&json_name);
    let loader_path = dir.join(format!("{}.config.cjs", stem));

    write_atomic(&json_path, &config.to_json_pretty()?)?;
    write_atomic(&loader_path, &CONFIG_LOADER.replace("__CONFIG_JSON__", &json_name))?;

    tracing::debug!(path = %loader_path.display(), "bundler configuration written");
    Ok(loader_path)
}

/// Write through a temp file in the destination directory, then rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let failed = |reason: std::io::Error| BuildError::ConfigWriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(failed)?;

    let mut file = NamedTempFile::new_in(dir).map_err(failed)?;
    file.write_all(content.as_bytes()).map_err(failed)?;
    file.persist(path).map_err(|e| failed(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;
    use tscripts_config::{synthesize, BuildEnvironment, BuildVariant};

    #[test]
    fn test_parse_command_line() {
        let bundler = ExternalBundler::parse("npx webpack", "/project").unwrap();
        assert_eq!(bundler.name(), "npx");
        assert_eq!(
            bundler.arguments(&["serve"], Path::new("/cache/app.config.cjs")),
            vec!["webpack", "serve", "--config", "/cache/app.config.cjs"]
        );
    }

    #[test]
    fn test_parse_empty_command_line() {
        let err = ExternalBundler::parse("   ", "/project").unwrap_err();
        assert!(matches!(err, CliError::Build(BuildError::InvalidCommand(_))));
    }

    #[test]
    fn test_write_config_creates_json_and_loader() {
        let dir = TempDir::new().unwrap();
        let env = BuildEnvironment::for_root(dir.path());
        let config = synthesize(&env, BuildVariant::App).unwrap();

        let loader = write_config(&config, &dir.path().join("cache"), "app.development").unwrap();

        assert_eq!(loader, dir.path().join("cache/app.development.config.cjs"));
        let script = std::fs::read_to_string(&loader).unwrap();
        assert!(script.contains("require('./app.development.json')"));

        let json = std::fs::read_to_string(dir.path().join("cache/app.development.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "development");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let bundler = ExternalBundler::parse("tscripts-no-such-bundler", ".").unwrap();
        let err = bundler.compile(Path::new("config.cjs")).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Build(BuildError::BundlerUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let bundler = ExternalBundler::parse("false", ".").unwrap();
        let err = bundler.compile(Path::new("config.cjs")).await.unwrap_err();
        match err {
            CliError::Build(BuildError::BundlerFailed { command, code }) => {
                assert!(command.starts_with("false --config"));
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let bundler = ExternalBundler::parse("true", ".").unwrap();
        bundler.watch(Path::new("config.cjs"), false).await.unwrap();
    }
}
