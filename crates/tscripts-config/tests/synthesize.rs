//! End-to-end tests: resolve a project on disk, then synthesize.

use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;
use tscripts_config::{
    synthesize, BuildEnvironment, BuildSettings, BuildVariant, EnvironmentResolver, Mode,
    ResolveInputs, SizeSubject, WARN_FILE_SIZE,
};

fn project(package_json: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), package_json).unwrap();
    dir
}

#[test]
fn scoped_package_builds_umd_library() {
    let dir = project(r#"{ "name": "@acme/date-picker" }"#);
    let overrides = BuildSettings {
        mode: Some("production".to_string()),
        ..BuildSettings::default()
    };
    let env = EnvironmentResolver::new(ResolveInputs::new(dir.path()).with_overrides(overrides))
        .resolve(BuildVariant::UmdLibrary)
        .unwrap();
    let config = synthesize(&env, BuildVariant::UmdLibrary).unwrap();

    assert_eq!(config.output.filename, "index.production.js");
    assert_eq!(config.output.library.unwrap().name, "TDatePicker");
    assert_eq!(config.output.path, dir.path().join("dist"));
}

#[test]
fn config_file_sits_between_package_and_env() {
    let dir = project(r#"{ "name": "app", "tscripts": { "publicPath": "/pkg/", "outputPath": "pkg" } }"#);
    fs::write(
        dir.path().join("tscripts.config.json"),
        r#"{ "publicPath": "/file/", "outputPath": "file" }"#,
    )
    .unwrap();
    let vars = BTreeMap::from([("TSCRIPTS_OUTPUT_PATH".to_string(), "env".to_string())]);

    let env = EnvironmentResolver::new(ResolveInputs::new(dir.path()).with_process_env(vars))
        .resolve(BuildVariant::App)
        .unwrap();

    assert_eq!(env.public_path, "/file/");
    assert_eq!(env.output_directory, dir.path().join("env"));
}

#[test]
fn env_file_reaches_define_plugin() {
    let dir = project(r#"{ "name": "app" }"#);
    fs::write(dir.path().join(".env"), "API_URL=https://api.example.com\n").unwrap();

    let env = EnvironmentResolver::new(ResolveInputs::new(dir.path()))
        .resolve(BuildVariant::App)
        .unwrap();
    let config = synthesize(&env, BuildVariant::App).unwrap();
    let define = config
        .plugins
        .iter()
        .find(|p| p.name == "DefinePlugin")
        .unwrap();

    assert_eq!(
        define.options["process.env.API_URL"],
        "\"https://api.example.com\""
    );
}

#[test]
fn oversized_output_warns_but_never_fails() {
    for mode in [Mode::Development, Mode::Production] {
        let env = BuildEnvironment::for_root("/project")
            .with_mode(mode)
            .with_library_name("TTool");
        for variant in [BuildVariant::App, BuildVariant::UmdTool] {
            let config = synthesize(&env, variant).unwrap();
            let warning = config.performance.check_asset(WARN_FILE_SIZE + 1).unwrap();
            assert_eq!(warning.subject, SizeSubject::Asset);
            assert_eq!(warning.limit, 5 * 1024 * 1024);
            assert!(config.performance.check_entrypoint(WARN_FILE_SIZE + 1).is_some());
            assert!(config.performance.check_asset(WARN_FILE_SIZE).is_none());
        }
    }
}

#[test]
fn serialized_configuration_uses_bundler_vocabulary() {
    let env = BuildEnvironment::for_root("/project").with_mode(Mode::Production);
    let config = synthesize(&env, BuildVariant::App).unwrap();
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["mode"], "production");
    assert_eq!(value["output"]["globalObject"], "this");
    assert_eq!(value["module"]["strictExportPresence"], true);
    assert_eq!(value["module"]["rules"][0]["oneOf"][0]["exclude"], "node_modules");
    assert_eq!(value["performance"]["hints"], "warning");
    assert_eq!(value["cache"]["type"], "filesystem");
    assert_eq!(value["devServer"]["historyApiFallback"], true);
    assert_eq!(value["devServer"]["static"]["serveIndex"], true);
    assert_eq!(value["devtool"], false);
}

#[test]
fn two_variants_from_one_environment_are_independent() {
    let env = BuildEnvironment::for_root("/project").with_library_name("TLib");
    let mut app = synthesize(&env, BuildVariant::App).unwrap();
    app.module.rules.clear();
    let again = synthesize(&env, BuildVariant::App).unwrap();
    assert!(!again.module.rules.is_empty());
    let tool = synthesize(&env, BuildVariant::UmdTool).unwrap();
    assert!(!tool.uses_loader("less-loader"));
}
