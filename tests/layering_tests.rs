// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for layer application and the environment profiles.

mod common;

use cms_settings::domain::environment::{
    CONSOLE_EMAIL_BACKEND, DEVELOPMENT_STATICFILES_STORAGE, SENTRY_ENVIRONMENT_PATH, STATIC_ROOT,
    STATIC_URL,
};
use cms_settings::prelude::*;
use common::MockConfigSource;
use std::sync::Arc;

fn key(name: &str) -> ConfigKey {
    ConfigKey::from(name)
}

fn base_with_sentry() -> ConfigLayer {
    let sentry: ConfigValue = [("class", "raven.handlers.logging.SentryHandler")]
        .into_iter()
        .collect();
    let handlers: ConfigValue = [("sentry", sentry)].into_iter().collect();
    let logging: ConfigValue = [("handlers", handlers)].into_iter().collect();
    ConfigLayer::new("common").with_value("LOGGING", logging)
}

#[test]
fn test_override_replaces_only_named_keys() {
    let base = ConfigLayer::new("base")
        .with_value("STATIC_URL", "/static/")
        .with_value("DEBUG", false);
    let debug = ConfigLayer::new("debug").with_value("DEBUG", true);

    let resolved = resolve_layers([&base, &debug]);

    let expected = ResolvedConfiguration::empty().apply_override(
        &ConfigLayer::new("expected")
            .with_value("STATIC_URL", "/static/")
            .with_value("DEBUG", true),
    );
    assert!(resolved.same_values(&expected));
    assert_eq!(resolved.len(), 2);
}

#[test]
fn test_apply_override_leaves_receiver_untouched() {
    let base = ResolvedConfiguration::empty()
        .apply_override(&ConfigLayer::new("base").with_value("DEBUG", false));
    let next = base.apply_override(&ConfigLayer::new("dev").with_value("DEBUG", true));

    assert_eq!(base.get(&key("DEBUG")), Some(&ConfigValue::Bool(false)));
    assert_eq!(next.get(&key("DEBUG")), Some(&ConfigValue::Bool(true)));
    assert_eq!(base.layers(), &["base"]);
    assert_eq!(next.layers(), &["base", "dev"]);
}

#[test]
fn test_production_profile() {
    let lookup = EnvironmentResolver::builder()
        .with_source(Box::new(
            MockConfigSource::new("file", FILE_PRIORITY).with_value("DEFAULT_SITE_THEME", "edx-theme"),
        ))
        .build();

    let settings = SettingsBuilder::new(Environment::Production)
        .build(&lookup)
        .unwrap();

    assert_eq!(settings.get(&key("STATIC_URL")), Some(&ConfigValue::from(STATIC_URL)));
    assert_eq!(settings.get(&key("STATIC_ROOT")), Some(&ConfigValue::from(STATIC_ROOT)));
    assert_eq!(
        settings.get(&key("DEFAULT_SITE_THEME")),
        Some(&ConfigValue::from("edx-theme"))
    );
    assert!(!settings.contains_key(&key("DEBUG")));
}

#[test]
fn test_build_profile_has_stub_services() {
    let settings = SettingsBuilder::new(Environment::Build)
        .build(&EnvironmentResolver::new())
        .unwrap();

    assert_eq!(settings.get(&key("DATABASES.default")), Some(&ConfigValue::empty_map()));
    assert_eq!(settings.get(&key("XQUEUE_INTERFACE.django_auth")), Some(&ConfigValue::Null));
    assert_eq!(settings.get(&key("DEFAULT_SITE_THEME")), Some(&ConfigValue::Null));
    assert_eq!(settings.layers(), &["build"]);
}

#[test]
fn test_development_profile() {
    let settings = SettingsBuilder::new(Environment::Development)
        .with_base_layer(base_with_sentry())
        .build(&EnvironmentResolver::new())
        .unwrap();

    assert_eq!(settings.get(&key("DEBUG")), Some(&ConfigValue::Bool(true)));
    assert_eq!(settings.get(&key("REQUIRE_DEBUG")), Some(&ConfigValue::Bool(true)));
    assert_eq!(settings.get(&key("PIPELINE_ENABLED")), Some(&ConfigValue::Bool(false)));
    assert_eq!(
        settings.get(&key("STATICFILES_STORAGE")),
        Some(&ConfigValue::from(DEVELOPMENT_STATICFILES_STORAGE))
    );
    assert_eq!(
        settings.get(&key("ALLOWED_HOSTS")),
        Some(&ConfigValue::List(vec![ConfigValue::from("*")]))
    );
    assert_eq!(
        settings.get(&key("EMAIL_BACKEND")),
        Some(&ConfigValue::from(CONSOLE_EMAIL_BACKEND))
    );
    assert_eq!(
        settings.get(&key(SENTRY_ENVIRONMENT_PATH)),
        Some(&ConfigValue::from("development"))
    );
    // sibling handler settings survive the patch
    assert!(settings.contains_key(&key("LOGGING.handlers.sentry.class")));
}

#[test]
fn test_development_without_sentry_handler_skips_patch() {
    let settings = SettingsBuilder::new(Environment::Development)
        .build(&EnvironmentResolver::new())
        .unwrap();

    assert!(!settings.contains_key(&key("LOGGING")));
    assert_eq!(settings.get(&key("DEBUG")), Some(&ConfigValue::Bool(true)));
}

#[test]
fn test_staging_profile_tags_sentry() {
    let lookup = EnvironmentResolver::builder()
        .with_source(Box::new(
            MockConfigSource::new("env", ENV_PRIORITY)
                .with_value("EMAIL_BACKEND", "django.core.mail.backends.smtp.EmailBackend"),
        ))
        .build();

    let settings = SettingsBuilder::new(Environment::Staging)
        .with_base_layer(base_with_sentry())
        .build(&lookup)
        .unwrap();

    assert_eq!(
        settings.get(&key(SENTRY_ENVIRONMENT_PATH)),
        Some(&ConfigValue::from("staging"))
    );
    assert!(settings.contains_key(&key("LOGGING.handlers.sentry.class")));
    assert_eq!(
        settings.get(&key("EMAIL_BACKEND")),
        Some(&ConfigValue::from("django.core.mail.backends.smtp.EmailBackend"))
    );
    assert_eq!(settings.get(&key("STATIC_URL")), Some(&ConfigValue::from(STATIC_URL)));
    assert_eq!(settings.layers(), &["common", "production", "staging"]);
}

#[test]
fn test_staging_without_sentry_handler_skips_patch() {
    let settings = SettingsBuilder::new(Environment::Staging)
        .build(&EnvironmentResolver::new())
        .unwrap();

    assert!(!settings.contains_key(&key("LOGGING")));
    assert_eq!(settings.layers(), &["production", "staging"]);
}

#[test]
fn test_every_environment_resolves() {
    let lookup = EnvironmentResolver::new();
    for env in Environment::ALL {
        let settings = SettingsBuilder::new(env).build(&lookup).unwrap();
        assert_eq!(settings.layers().last().map(String::as_str), Some(env.as_str()));
        assert!(settings.contains_key(&key("STATIC_URL")));
    }
}

#[test]
fn test_resolved_configuration_shared_across_threads() {
    let settings = Arc::new(
        SettingsBuilder::new(Environment::Staging)
            .build(&EnvironmentResolver::new())
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let settings = Arc::clone(&settings);
            std::thread::spawn(move || settings.get(&key("STATIC_URL")).cloned())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(ConfigValue::from(STATIC_URL)));
    }
}
