use super::configuration::{
    CacheOptions, Configuration, DevServerOptions, PerformanceOptions, RuleGroup, StaticOptions,
    STRICT_WARN_FILE_SIZE, WARN_FILE_SIZE,
};
use super::loaders::{self, LoaderFlags, Polyfills, StyleLanguage};
use super::{base, plugins, script_filenames};
use crate::cache_key::derive_key;
use crate::environment::{BuildEnvironment, PerformanceProfile};
use crate::error::Result;
use crate::variant::BuildVariant;

const EXTENSIONS: [&str; 6] = [".ts", ".tsx", ".js", ".jsx", ".vue", ".json"];

/// Directory served as-is by the dev server and holding the HTML template.
const PUBLIC_DIR: &str = "public";

pub(super) fn compose(env: &BuildEnvironment) -> Result<Configuration> {
    let flags = LoaderFlags::from_environment(env);
    let (filename, _) = script_filenames(env.mode);
    let mut config = base(env, &EXTENSIONS, filename);

    config.output.clean = env.mode.is_production();
    config.module.rules = vec![RuleGroup {
        one_of: vec![
            loaders::script_rule(flags, Polyfills::Usage),
            loaders::style_rule(flags, StyleLanguage::Css),
            loaders::style_rule(flags, StyleLanguage::Less),
            loaders::asset_rule(env.mode),
        ],
    }];
    config.plugins = vec![
        plugins::extract_css(env.mode),
        plugins::html_template(env),
        plugins::define_env(env.mode, &env.extra_env_vars),
    ];
    config.optimization.minimizer = vec![plugins::terser(), plugins::css_minimizer()];
    config.performance = PerformanceOptions::warn_above(match env.performance {
        PerformanceProfile::Default => WARN_FILE_SIZE,
        PerformanceProfile::Strict => STRICT_WARN_FILE_SIZE,
    });
    config.cache = Some(CacheOptions {
        kind: "filesystem".to_string(),
        cache_directory: env.cache_directory.clone(),
        version: derive_key(env).as_hex().to_string(),
        name: format!("{}-{}", BuildVariant::App, env.mode),
    });
    config.dev_server = Some(DevServerOptions {
        compress: false,
        history_api_fallback: true,
        static_files: StaticOptions {
            directory: env.project_root.join(PUBLIC_DIR),
            serve_index: true,
        },
    });

    Ok(config)
}
