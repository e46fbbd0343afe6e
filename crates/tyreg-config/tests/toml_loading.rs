//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use tyreg_config::{ConfigError, TyregConfig};
use tyreg_core::{DuplicatePolicy, RegistrationPolicy, UnresolvedPolicy};

#[test]
fn loads_registry_policy_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[registry]
duplicate_types = "reject"
duplicate_fields = "reject"
unresolved_types = "reject"
"#,
        )?;

        let config: TyregConfig = Figment::from(Serialized::defaults(TyregConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.registry, RegistrationPolicy::strict());
        Ok(())
    });
}

#[test]
fn project_config_is_read_from_dot_tyreg() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tyreg")?;
        jail.create_file(
            ".tyreg/config.toml",
            r##"
[export]
ref_prefix = "#/components/schemas/"
pretty = false
"##,
        )?;

        let config = TyregConfig::load().expect("config loads");
        assert_eq!(config.export.ref_prefix, "#/components/schemas/");
        assert!(!config.export.pretty);
        assert_eq!(config.registry, RegistrationPolicy::default());
        Ok(())
    });
}

#[test]
fn load_from_uses_the_given_root() {
    Jail::expect_with(|jail| {
        jail.create_dir("project/.tyreg")?;
        jail.create_file(
            "project/.tyreg/config.toml",
            r#"
[registry]
duplicate_types = "reject"
"#,
        )?;

        let here = TyregConfig::load().expect("config loads");
        assert_eq!(here.registry.duplicate_types, DuplicatePolicy::Replace);

        let there = TyregConfig::load_from(&jail.directory().join("project")).expect("config loads");
        assert_eq!(there.registry.duplicate_types, DuplicatePolicy::Reject);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tyreg")?;
        jail.create_file(
            ".tyreg/config.toml",
            r#"
[registry]
unresolved_types = "fallback"
"#,
        )?;
        jail.set_env("TYREG_REGISTRY__UNRESOLVED_TYPES", "reject");

        let config = TyregConfig::load().expect("config loads");
        assert_eq!(config.registry.unresolved_types, UnresolvedPolicy::Reject);
        Ok(())
    });
}

#[test]
fn unknown_policy_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TYREG_REGISTRY__DUPLICATE_TYPES", "sometimes");

        assert!(matches!(TyregConfig::load(), Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn invalid_ref_prefix_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("TYREG_EXPORT__REF_PREFIX", "has space/");

        assert!(matches!(
            TyregConfig::load(),
            Err(ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}
