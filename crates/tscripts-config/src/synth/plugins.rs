//! Plugins and minimizers.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::configuration::PluginSpec;
use crate::environment::BuildEnvironment;
use crate::mode::Mode;

pub const EXTRACT_PLUGIN: &str = "mini-css-extract-plugin";
pub const HTML_PLUGIN: &str = "html-webpack-plugin";
pub const DEFINE_PLUGIN: &str = "DefinePlugin";
pub const TERSER_PLUGIN: &str = "terser-webpack-plugin";
pub const CSS_MINIMIZER_PLUGIN: &str = "css-minimizer-webpack-plugin";

/// HTML template relative to the project root.
pub const HTML_TEMPLATE: &str = "public/index.html";

/// Stylesheet extraction with mode-dependent file names.
pub fn extract_css(mode: Mode) -> PluginSpec {
    let (filename, chunk_filename) = if mode.is_production() {
        ("[name].[contenthash:10].css", "[id].[contenthash:10].chunk.css")
    } else {
        ("[name].css", "[name].chunk.css")
    };
    PluginSpec::new(
        EXTRACT_PLUGIN,
        json!({ "filename": filename, "chunkFilename": chunk_filename }),
    )
}

pub fn html_template(env: &BuildEnvironment) -> PluginSpec {
    PluginSpec::new(
        HTML_PLUGIN,
        json!({
            "template": env.project_root.join(HTML_TEMPLATE).display().to_string(),
            "inject": true,
            "minify": env.mode.is_production(),
        }),
    )
}

/// Expose variables as `process.env.*` compile-time constants.
///
/// Values are JSON-encoded string literals. `NODE_ENV` always reflects the
/// mode and cannot be overridden from the environment.
pub fn define_env(mode: Mode, vars: &BTreeMap<String, String>) -> PluginSpec {
    let mut definitions = Map::new();
    for (key, value) in vars {
        definitions.insert(
            format!("process.env.{}", key),
            Value::String(Value::String(value.clone()).to_string()),
        );
    }
    definitions.insert(
        "process.env.NODE_ENV".to_string(),
        Value::String(Value::String(mode.as_str().to_string()).to_string()),
    );
    PluginSpec::new(DEFINE_PLUGIN, Value::Object(definitions))
}

/// Script minimizer: no extracted comment files, a single compress pass,
/// the Safari 10 mangling workaround and no comments in output.
pub fn terser() -> PluginSpec {
    PluginSpec::new(
        TERSER_PLUGIN,
        json!({
            "extractComments": false,
            "terserOptions": {
                "compress": { "passes": 1 },
                "mangle": { "safari10": true },
                "output": { "comments": false },
            },
        }),
    )
}

pub fn css_minimizer() -> PluginSpec {
    PluginSpec::new(CSS_MINIMIZER_PLUGIN, Value::Null)
}
