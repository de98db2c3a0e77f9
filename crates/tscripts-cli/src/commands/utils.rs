//! Shared helpers for command implementations.

use std::path::Path;

use tscripts_config::{
    BuildEnvironment, BuildVariant, Configuration, EnvironmentResolver, Mode, ResolveInputs,
    SizeWarning,
};
use tscripts_styles::{CssPipeline, PipelineReport, StyleMode, StylePipeline};
use walkdir::WalkDir;

use crate::cli::EnvArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Resolve the build environment from flags, project files and the
/// current process environment.
pub fn resolve_environment(args: &EnvArgs, variant: BuildVariant) -> Result<BuildEnvironment> {
    let inputs = ResolveInputs::new(args.root())
        .with_overrides(args.to_settings())
        .capture_process_env();
    Ok(EnvironmentResolver::new(inputs).resolve(variant)?)
}

/// File stem for the configuration written under the cache directory.
pub fn config_stem(variant: BuildVariant, mode: Mode) -> String {
    format!("{}.{}", variant, mode)
}

/// Run the selected stylesheet pipelines off the async runtime and print a
/// summary per pipeline.
pub async fn run_styles(
    env: &BuildEnvironment,
    modes: &'static [StyleMode],
    css: bool,
) -> Result<()> {
    let owned = env.clone();
    let reports = tokio::task::spawn_blocking(move || -> Result<Vec<PipelineReport>> {
        let mut reports = Vec::with_capacity(modes.len() + 1);
        let pipeline = StylePipeline::for_environment(&owned);
        for &mode in modes {
            reports.push(pipeline.run(mode)?);
        }
        if css {
            reports.push(CssPipeline::for_environment(&owned).run()?);
        }
        Ok(reports)
    })
    .await
    .map_err(|e| CliError::Task(e.to_string()))??;

    for report in &reports {
        ui::print_style_summary(report, &env.project_root);
    }
    Ok(())
}

/// Emitted files above the configured performance thresholds.
///
/// Every `.js` and `.css` file under `output_dir` is checked as an asset.
/// When the entry filename has no placeholders the matching file is also
/// checked as the entrypoint.
pub fn oversized_outputs(
    config: &Configuration,
    output_dir: &Path,
) -> Result<Vec<(String, SizeWarning)>> {
    let mut warnings = Vec::new();
    if !output_dir.exists() {
        return Ok(warnings);
    }

    let fixed_entry = (!config.output.filename.contains('[')).then_some(&config.output.filename);

    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry
            .map_err(std::io::Error::from)
            .context("Failed to scan the output directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_asset = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "js" || ext == "css");
        if !is_asset {
            continue;
        }

        let size = entry
            .metadata()
            .map_err(std::io::Error::from)
            .with_path(entry.path())?
            .len();
        let name = entry
            .path()
            .strip_prefix(output_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        if let Some(warning) = config.performance.check_asset(size) {
            warnings.push((name.clone(), warning));
        }
        if fixed_entry.is_some_and(|entry_name| *entry_name == name) {
            if let Some(warning) = config.performance.check_entrypoint(size) {
                warnings.push((name, warning));
            }
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tscripts_config::{synthesize, SizeSubject, WARN_FILE_SIZE};

    #[test]
    fn test_config_stem() {
        assert_eq!(
            config_stem(BuildVariant::UmdTool, Mode::Production),
            "umd-tool.production"
        );
    }

    #[test]
    fn test_resolve_environment_uses_flags() {
        let dir = TempDir::new().unwrap();
        let args = EnvArgs {
            cwd: Some(dir.path().to_path_buf()),
            mode: Some("production".to_string()),
            out_dir: Some("build".into()),
            ..EnvArgs::default()
        };

        let env = resolve_environment(&args, BuildVariant::App).unwrap();
        assert_eq!(env.mode, Mode::Production);
        assert!(env.output_directory.ends_with("build"));
    }

    #[test]
    fn test_oversized_outputs() {
        let dir = TempDir::new().unwrap();
        let env = BuildEnvironment::for_root(dir.path())
            .with_mode(Mode::Production)
            .with_library_name("TWidget");
        let config = synthesize(&env, BuildVariant::UmdTool).unwrap();

        let out = dir.path().join("dist");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("index.min.js"), vec![b'a'; WARN_FILE_SIZE as usize + 1]).unwrap();
        std::fs::write(out.join("small.js"), "x").unwrap();
        std::fs::write(out.join("notes.txt"), vec![b'a'; WARN_FILE_SIZE as usize + 1]).unwrap();

        let warnings = oversized_outputs(&config, &out).unwrap();
        let subjects: Vec<_> = warnings
            .iter()
            .map(|(name, w)| (name.as_str(), w.subject))
            .collect();
        assert_eq!(
            subjects,
            vec![
                ("index.min.js", SizeSubject::Asset),
                ("index.min.js", SizeSubject::Entrypoint),
            ]
        );
    }

    #[test]
    fn test_oversized_outputs_missing_dir() {
        let dir = TempDir::new().unwrap();
        let env = BuildEnvironment::for_root(dir.path());
        let config = synthesize(&env, BuildVariant::App).unwrap();
        assert!(oversized_outputs(&config, &dir.path().join("dist")).unwrap().is_empty());
    }
}
