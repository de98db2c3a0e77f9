#[cfg(test)]
mod tests {
    use crate::cli::enums::{StylesArg, VariantArg};
    use crate::cli::validation::parse_global;
    use crate::cli::{Cli, Command, DEFAULT_BUNDLER};
    use clap::{Parser, ValueEnum};
    use std::path::PathBuf;
    use tscripts_config::{BuildVariant, PerformanceProfile};
    use tscripts_styles::StyleMode;

    #[test]
    fn test_parse_global_valid_identifiers() {
        assert_eq!(parse_global("TDatePicker"), Ok("TDatePicker".to_string()));
        assert_eq!(parse_global("_private"), Ok("_private".to_string()));
        assert_eq!(parse_global("$jq"), Ok("$jq".to_string()));
        assert_eq!(parse_global("lib123"), Ok("lib123".to_string()));
        assert_eq!(parse_global("My_Lib$123"), Ok("My_Lib$123".to_string()));
    }

    #[test]
    fn test_parse_global_invalid() {
        assert!(parse_global("123lib").is_err());
        assert!(parse_global("-lib").is_err());
        assert!(parse_global("@acme/widget").is_err());
        assert!(parse_global("my-lib").is_err());
        assert!(parse_global("my.lib").is_err());
        assert!(parse_global("my lib").is_err());
    }

    #[test]
    fn test_parse_global_empty() {
        let err = parse_global("").unwrap_err();
        assert_eq!(err, "Library name cannot be empty");
    }

    #[test]
    fn test_parse_global_unicode() {
        assert_eq!(parse_global("café"), Ok("café".to_string()));
    }

    #[test]
    fn test_variant_enum_values() {
        let names: Vec<_> = VariantArg::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(names, vec!["app", "umd-library", "umd-tool"]);
    }

    #[test]
    fn test_styles_enum_modes() {
        assert_eq!(StylesArg::Copy.modes(), &[StyleMode::Copy]);
        assert_eq!(StylesArg::Compiled.modes(), &[StyleMode::Compiled]);
        assert_eq!(StylesArg::All.modes(), &[StyleMode::Copy, StyleMode::Compiled]);
    }

    #[test]
    fn test_cli_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["tscripts", "--verbose", "--quiet", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_args_defaults() {
        let args = Cli::try_parse_from(["tscripts", "build"]).unwrap();

        let Command::Build(build) = args.command else {
            panic!("Expected Build command");
        };
        assert_eq!(build.variant, VariantArg::App);
        assert_eq!(build.bundler, DEFAULT_BUNDLER);
        assert!(build.styles.is_none());
        assert!(!build.css);
        assert!(build.env.mode.is_none());
        assert_eq!(build.env.root(), PathBuf::from("."));
        assert_eq!(build.env.to_settings(), Default::default());
    }

    #[test]
    fn test_type_alias_and_short_variants() {
        let args = Cli::try_parse_from(["tscripts", "build", "--type", "umd"]).unwrap();
        let Command::Build(build) = args.command else {
            panic!("Expected Build command");
        };
        assert_eq!(BuildVariant::from(build.variant), BuildVariant::UmdTool);

        let args = Cli::try_parse_from(["tscripts", "start", "--variant", "umd-lib"]).unwrap();
        let Command::Start(start) = args.command else {
            panic!("Expected Start command");
        };
        assert_eq!(BuildVariant::from(start.variant), BuildVariant::UmdLibrary);
    }

    #[test]
    fn test_env_flags_become_settings() {
        let args = Cli::try_parse_from([
            "tscripts",
            "config",
            "--mode",
            "production",
            "--out-dir",
            "build",
            "--public-path",
            "/static/",
            "--lib-name",
            "TWidget",
            "--strict-performance",
            "--no-source-map",
        ])
        .unwrap();

        let Command::Config(config) = args.command else {
            panic!("Expected Config command");
        };
        let settings = config.env.to_settings();
        assert_eq!(settings.mode.as_deref(), Some("production"));
        assert_eq!(settings.output_path, Some(PathBuf::from("build")));
        assert_eq!(settings.public_path.as_deref(), Some("/static/"));
        assert_eq!(settings.lib_name.as_deref(), Some("TWidget"));
        assert_eq!(settings.source_map, Some(false));
        assert_eq!(settings.performance, Some(PerformanceProfile::Strict));
    }

    #[test]
    fn test_lib_name_is_validated() {
        let result = Cli::try_parse_from(["tscripts", "build", "--lib-name", "my-widget"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let result = Cli::try_parse_from(["tscripts", "build", "--type", "cjs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_styles_args_defaults() {
        let args = Cli::try_parse_from(["tscripts", "styles", "--cwd", "web"]).unwrap();

        let Command::Styles(styles) = args.command else {
            panic!("Expected Styles command");
        };
        assert_eq!(styles.mode, StylesArg::All);
        assert!(!styles.watch);
        assert_eq!(styles.debounce_ms, 100);
        assert_eq!(styles.env().root(), PathBuf::from("web"));
    }
}
