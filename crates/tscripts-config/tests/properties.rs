//! Property-based tests for the derivers and the synthesizer.

use proptest::prelude::*;
use tscripts_config::{
    derive_key, derive_library_name, synthesize, BuildEnvironment, BuildVariant, ConfigError,
    Mode, PerformanceProfile,
};

/// Hyphen-separated lowercase segments, e.g. `rich-text-editor`.
fn package_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9]{0,8}", 1..=4)
}

fn expected_library_name(segments: &[String]) -> String {
    let mut name = String::from("T");
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn environment_strategy() -> impl Strategy<Value = BuildEnvironment> {
    (
        prop::bool::ANY,
        prop::bool::ANY,
        prop::bool::ANY,
        "/[a-z]{1,6}",
        prop::collection::btree_map("[A-Z]{1,6}", "[a-z0-9]{0,6}", 0..4),
        prop::option::of("T[A-Z][a-z]{0,6}"),
    )
        .prop_map(|(production, maps, strict, public, vars, lib)| {
            let mut env = BuildEnvironment::for_root("/project").with_mode(if production {
                Mode::Production
            } else {
                Mode::Development
            });
            env.source_maps = maps;
            env.public_path = format!("{}/", public);
            env.extra_env_vars = vars;
            env.library_name = lib;
            if strict {
                env.performance = PerformanceProfile::Strict;
            }
            env
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Scoped names always derive `T` + PascalCase of the hyphen segments.
    #[test]
    fn prop_scoped_names_derive_pascal_case(
        scope in "[a-z][a-z0-9]{0,6}",
        segments in package_segments(),
    ) {
        let package = format!("@{}/{}", scope, segments.join("-"));
        let derived = derive_library_name(&package).unwrap();
        prop_assert_eq!(derived, expected_library_name(&segments));
    }

    /// Names without a scope never derive.
    #[test]
    fn prop_unscoped_names_are_rejected(name in "[a-z][a-z0-9-]{0,12}") {
        let is_invalid_package_name = matches!(
            derive_library_name(&name),
            Err(ConfigError::InvalidPackageName { .. })
        );
        prop_assert!(is_invalid_package_name);
    }

    /// Equal environments hash equally; the key is 64 hex characters.
    #[test]
    fn prop_cache_key_is_deterministic(env in environment_strategy()) {
        let a = derive_key(&env);
        let b = derive_key(&env.clone());
        prop_assert_eq!(a.as_hex().len(), 64);
        prop_assert_eq!(a, b);
    }

    /// Changing the mode always changes the key.
    #[test]
    fn prop_mode_change_changes_key(env in environment_strategy()) {
        let flipped = if env.mode.is_production() { Mode::Development } else { Mode::Production };
        prop_assert_ne!(derive_key(&env), derive_key(&env.clone().with_mode(flipped)));
    }

    /// Library variants fail exactly when no library name is present.
    #[test]
    fn prop_umd_fails_iff_library_name_missing(env in environment_strategy()) {
        let result = synthesize(&env, BuildVariant::UmdLibrary);
        prop_assert_eq!(result.is_err(), env.library_name().is_none());
    }

    /// Synthesis is a pure function of its inputs.
    #[test]
    fn prop_synthesis_is_pure(env in environment_strategy()) {
        for variant in BuildVariant::ALL {
            let first = synthesize(&env, variant);
            let second = synthesize(&env, variant);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "synthesis outcome differed between calls"),
            }
        }
    }

    /// Bail and minimize track production mode for every variant.
    #[test]
    fn prop_bail_and_minimize_follow_mode(env in environment_strategy()) {
        let env = env.with_library_name("TLib");
        for variant in BuildVariant::ALL {
            let config = synthesize(&env, variant).unwrap();
            prop_assert_eq!(config.bail, env.mode.is_production());
            prop_assert_eq!(config.optimization.minimize, env.mode.is_production());
        }
    }
}
