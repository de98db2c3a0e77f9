//! Loader chains.
//!
//! Every builder takes its flags explicitly and returns a fresh value, so two
//! configurations synthesized in one process never share loader state.

use serde_json::json;

use super::configuration::{LoaderSpec, Rule, INLINE_ASSET_LIMIT};
use crate::environment::BuildEnvironment;
use crate::mode::Mode;

pub const SCRIPT_TEST: &str = r"\.(t|j)sx?$";
pub const CSS_TEST: &str = r"\.css$";
pub const LESS_TEST: &str = r"\.less$";
pub const ASSET_TEST: &str = r"\.(png|jpe?g|gif|svg|webp|avif|woff2?|eot|ttf|otf)$";
pub const NODE_MODULES: &str = "node_modules";

/// Pinned polyfill library version for usage-based injection.
const COREJS_VERSION: &str = "3.19.1";

/// Inputs shared by every loader builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderFlags<'a> {
    pub mode: Mode,
    pub source_maps: bool,
    pub browserslist: &'a str,
}

impl<'a> LoaderFlags<'a> {
    pub fn from_environment(env: &'a BuildEnvironment) -> Self {
        Self {
            mode: env.mode,
            source_maps: env.source_maps,
            browserslist: &env.browserslist,
        }
    }

    /// Source maps are emitted in development only.
    pub fn maps_enabled(&self) -> bool {
        !self.mode.is_production() && self.source_maps
    }
}

/// How the transpiler supplies missing runtime features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polyfills {
    /// Inject global polyfills where used (applications and tools).
    Usage,
    /// Import polyfills through the helper runtime without touching globals
    /// (libraries embedded in someone else's page).
    Runtime,
}

/// Transpiler loader for scripts.
pub fn script_loader(flags: LoaderFlags<'_>, polyfills: Polyfills) -> LoaderSpec {
    let maps = flags.maps_enabled();
    let (preset_env, transform_runtime) = match polyfills {
        Polyfills::Usage => (
            json!(["@babel/preset-env", { "useBuiltIns": "usage", "corejs": COREJS_VERSION }]),
            json!(["@babel/plugin-transform-runtime", { "proposals": true }]),
        ),
        Polyfills::Runtime => (
            json!(["@babel/preset-env", {}]),
            json!(["@babel/plugin-transform-runtime", { "corejs": 3, "proposals": true }]),
        ),
    };

    LoaderSpec::new(
        "babel-loader",
        Some(json!({
            "targets": flags.browserslist,
            "sourceMaps": maps,
            "inputSourceMap": maps,
            "cacheDirectory": true,
            "cacheCompression": false,
            "presets": [
                preset_env,
                ["@babel/preset-react", { "runtime": "automatic" }],
                "@babel/preset-typescript",
            ],
            "plugins": [
                transform_runtime,
                ["@babel/plugin-syntax-top-level-await"],
            ],
        })),
    )
}

pub fn script_rule(flags: LoaderFlags<'_>, polyfills: Polyfills) -> Rule {
    Rule::new(SCRIPT_TEST, vec![script_loader(flags, polyfills)]).exclude(NODE_MODULES)
}

/// Stylesheet source languages with their own rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleLanguage {
    Css,
    Less,
}

/// Extract, resolve, prefix, and (for LESS) compile.
pub fn style_loaders(flags: LoaderFlags<'_>, language: StyleLanguage) -> Vec<LoaderSpec> {
    let maps = flags.maps_enabled();
    let mut chain = vec![
        LoaderSpec::new("mini-css-extract-plugin/loader", None),
        LoaderSpec::new("css-loader", Some(json!({ "sourceMap": maps }))),
        LoaderSpec::new(
            "postcss-loader",
            Some(json!({
                "postcssOptions": {
                    "config": false,
                    "plugins": [["postcss-preset-env", { "browsers": flags.browserslist }]],
                },
            })),
        ),
    ];
    if language == StyleLanguage::Less {
        chain.push(LoaderSpec::new(
            "less-loader",
            Some(json!({
                "lessOptions": { "javascriptEnabled": true },
                "sourceMap": maps,
            })),
        ));
    }
    chain
}

pub fn style_rule(flags: LoaderFlags<'_>, language: StyleLanguage) -> Rule {
    let test = match language {
        StyleLanguage::Css => CSS_TEST,
        StyleLanguage::Less => LESS_TEST,
    };
    Rule::new(test, style_loaders(flags, language))
}

/// Images and fonts: inline below [`INLINE_ASSET_LIMIT`], emitted otherwise.
pub fn asset_rule(mode: Mode) -> Rule {
    let name = if mode.is_production() {
        "assets/[name].[contenthash:10][ext]"
    } else {
        "assets/[name][ext]"
    };
    Rule {
        kind: Some("asset".to_string()),
        parser: Some(json!({ "dataUrlCondition": { "maxSize": INLINE_ASSET_LIMIT } })),
        generator: Some(json!({ "filename": name })),
        ..Rule::new(ASSET_TEST, Vec::new())
    }
}
