// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading layer files.

mod common;

use cms_settings::prelude::*;
use common::write_temp;

#[test]
#[cfg(feature = "yaml")]
fn test_load_yaml_layer() {
    let file = write_temp(
        ".yaml",
        "STATIC_URL: /static/\nDEBUG: false\nALLOWED_HOSTS:\n  - cms.example.com\n",
    );

    let layer = load_layer(file.path()).unwrap();

    assert_eq!(layer.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(false)));
    assert_eq!(
        layer.get(&ConfigKey::from("ALLOWED_HOSTS")),
        Some(&ConfigValue::List(vec![ConfigValue::from("cms.example.com")]))
    );
}

#[test]
fn test_load_env_file_layer() {
    let file = write_temp(
        ".env",
        "# staging toggles\nexport EMAIL_BACKEND=smtp\nDEBUG=true\nSITE_NAME=\"studio\"\n",
    );

    let layer = load_layer(file.path()).unwrap();

    assert_eq!(layer.get(&ConfigKey::from("EMAIL_BACKEND")), Some(&ConfigValue::from("smtp")));
    assert_eq!(layer.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(true)));
    assert_eq!(layer.get(&ConfigKey::from("SITE_NAME")), Some(&ConfigValue::from("studio")));
}

#[test]
#[cfg(feature = "yaml")]
fn test_malformed_overlay_returns_load_error() {
    let base = write_temp(".yaml", "STATIC_URL: /static/\n");
    let broken = write_temp(".yaml", "DEBUG: [true\n  STATIC_URL: {\n");

    let result = SettingsBuilder::new(Environment::Development)
        .with_base_file(base.path())
        .with_overlay_file(broken.path())
        .build(&EnvironmentResolver::new());

    match result {
        Err(e) => assert!(e.is_load_error(), "expected LoadError, got {e:?}"),
        Ok(settings) => panic!("expected LoadError, got {settings:?}"),
    }
}

#[test]
fn test_malformed_env_file_returns_load_error() {
    let broken = write_temp(".env", "DEBUG=true\nthis line has no assignment\n");
    let err = load_layer(broken.path()).unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn test_unsupported_extension_returns_load_error() {
    let file = write_temp(".ini", "[cms]\nDEBUG=true\n");
    let err = load_layer(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError { .. }));
}

#[test]
fn test_missing_file_returns_load_error() {
    let err = load_layer("/nonexistent/cms/production.yaml").unwrap_err();
    assert!(err.is_load_error());
}

#[test]
#[cfg(feature = "yaml")]
fn test_file_layers_apply_in_order() {
    let base = write_temp(
        ".yaml",
        "STATIC_URL: /static/\nDEBUG: false\nTIME_ZONE: UTC\nLOGGING:\n  handlers:\n    sentry:\n      class: raven.handlers.logging.SentryHandler\n",
    );
    let local = write_temp(".yaml", "TIME_ZONE: America/New_York\nLOGGING.handlers.sentry.level: WARNING\n");

    let settings = SettingsBuilder::new(Environment::Staging)
        .with_base_file(base.path())
        .with_overlay_file(local.path())
        .build(&EnvironmentResolver::new())
        .unwrap();

    assert_eq!(
        settings.get(&ConfigKey::from("TIME_ZONE")),
        Some(&ConfigValue::from("America/New_York"))
    );
    assert_eq!(
        settings.get(&ConfigKey::from("LOGGING.handlers.sentry.level")),
        Some(&ConfigValue::from("WARNING"))
    );
    assert_eq!(
        settings.get(&ConfigKey::from("LOGGING.handlers.sentry.environment")),
        Some(&ConfigValue::from("staging"))
    );
    // production profile replaced the base value
    assert_eq!(
        settings.get(&ConfigKey::from("STATIC_URL")),
        Some(&ConfigValue::from("/static/studio/"))
    );
    assert_eq!(settings.layers().len(), 4);
}
