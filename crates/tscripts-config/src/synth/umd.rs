use std::collections::BTreeMap;

use super::configuration::{Configuration, LibraryOptions, RuleGroup};
use super::loaders::{self, LoaderFlags, Polyfills};
use super::{base, library_name, plugins};
use crate::environment::BuildEnvironment;
use crate::error::Result;
use crate::variant::BuildVariant;

const LIBRARY_EXTENSIONS: [&str; 6] = [".ts", ".tsx", ".js", ".jsx", ".vue", ".json"];
const TOOL_EXTENSIONS: [&str; 5] = [".ts", ".tsx", ".js", ".jsx", ".json"];

/// UMD bundle that expects the host page to provide the UI framework.
pub(super) fn compose_library(env: &BuildEnvironment) -> Result<Configuration> {
    let name = library_name(env, BuildVariant::UmdLibrary)?;
    let filename = format!("index.{}.js", env.mode);
    let mut config = umd(env, name, &LIBRARY_EXTENSIONS, filename, Polyfills::Runtime);
    config.externals = BTreeMap::from([
        ("react".to_string(), "React".to_string()),
        ("react-dom".to_string(), "ReactDOM".to_string()),
    ]);
    Ok(config)
}

/// Self-contained UMD bundle.
pub(super) fn compose_tool(env: &BuildEnvironment) -> Result<Configuration> {
    let name = library_name(env, BuildVariant::UmdTool)?;
    let filename = if env.mode.is_production() {
        "index.min.js".to_string()
    } else {
        "index.js".to_string()
    };
    Ok(umd(env, name, &TOOL_EXTENSIONS, filename, Polyfills::Usage))
}

fn umd(
    env: &BuildEnvironment,
    name: String,
    extensions: &[&str],
    filename: String,
    polyfills: Polyfills,
) -> Configuration {
    let flags = LoaderFlags::from_environment(env);
    let mut config = base(env, extensions, filename);
    config.output.library = Some(LibraryOptions {
        kind: "umd".to_string(),
        name,
    });
    config.module.rules = vec![RuleGroup {
        one_of: vec![loaders::script_rule(flags, polyfills)],
    }];
    config.optimization.minimizer = vec![plugins::terser()];
    config
}
