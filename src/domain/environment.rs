// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in environment profiles for the CMS.
//!
//! Each environment is a fixed chain of layers applied on top of the shared base
//! settings:
//!
//! | environment   | layers                       |
//! |---------------|------------------------------|
//! | `build`       | `build`                      |
//! | `production`  | `production`                 |
//! | `development` | `production` → `development` |
//! | `staging`     | `production` → `staging`     |
//!
//! Development and staging tag the sentry logging handler with their name, but only
//! when the base settings configure that handler; they never create one.
//!
//! The `build` profile only exists to run the static asset collection while building
//! the production image, so it stubs the database and queue settings out.

use crate::domain::{ConfigError, ConfigKey, ConfigLayer, ConfigValue, ConfigurationSource, PatchMode};
use std::fmt;
use std::str::FromStr;

/// URL prefix under which the CMS serves its static files.
pub const STATIC_URL: &str = "/static/studio/";

/// Directory the collected static files are written to.
pub const STATIC_ROOT: &str = "/edx/app/edxapp/staticfiles/studio";

/// Mail backend used outside production unless overridden.
pub const CONSOLE_EMAIL_BACKEND: &str = "django.core.mail.backends.console.EmailBackend";

/// Static files storage that skips manifest hashing.
pub const DEVELOPMENT_STATICFILES_STORAGE: &str = "openedx.core.storage.DevelopmentStorage";

/// Path of the environment tag on the sentry logging handler.
pub const SENTRY_ENVIRONMENT_PATH: &str = "LOGGING.handlers.sentry.environment";

/// A deployment environment with a built-in layer chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Asset build inside the production image.
    Build,
    /// Production.
    Production,
    /// Local development.
    Development,
    /// Pre-production staging.
    Staging,
}

impl Environment {
    /// All environments, in declaration order.
    pub const ALL: [Environment; 4] = [
        Environment::Build,
        Environment::Production,
        Environment::Development,
        Environment::Staging,
    ];

    /// The lowercase name of the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Build => "build",
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Staging => "staging",
        }
    }

    /// Builds the layer chain for this environment.
    ///
    /// `lookup` answers the per-deployment toggles (`DEFAULT_SITE_THEME`,
    /// `EMAIL_BACKEND`); absent keys fall back to the built-in defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_settings::domain::{ConfigKey, ConfigValue, Environment, ResolvedConfiguration};
    ///
    /// let resolved = Environment::Development
    ///     .layers(&ResolvedConfiguration::empty())
    ///     .iter()
    ///     .fold(ResolvedConfiguration::empty(), |acc, layer| acc.apply_override(layer));
    ///
    /// assert_eq!(resolved.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(true)));
    /// assert_eq!(resolved.layers(), &["production".to_string(), "development".to_string()]);
    /// ```
    pub fn layers(&self, lookup: &dyn ConfigurationSource) -> Vec<ConfigLayer> {
        match self {
            Environment::Build => vec![build_layer(lookup)],
            Environment::Production => vec![production_layer(lookup)],
            Environment::Development => vec![production_layer(lookup), development_layer(lookup)],
            Environment::Staging => vec![production_layer(lookup), staging_layer(lookup)],
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "build" => Ok(Environment::Build),
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            _ => Err(ConfigError::UnknownEnvironment {
                name: s.to_string(),
            }),
        }
    }
}

fn site_theme(lookup: &dyn ConfigurationSource) -> ConfigValue {
    lookup.get(&ConfigKey::from("DEFAULT_SITE_THEME"), ConfigValue::Null)
}

fn email_backend(lookup: &dyn ConfigurationSource) -> ConfigValue {
    lookup.get(
        &ConfigKey::from("EMAIL_BACKEND"),
        ConfigValue::from(CONSOLE_EMAIL_BACKEND),
    )
}

fn build_layer(lookup: &dyn ConfigurationSource) -> ConfigLayer {
    let databases: ConfigValue = [("default", ConfigValue::empty_map())].into_iter().collect();
    let xqueue: ConfigValue = [("url", ConfigValue::Null), ("django_auth", ConfigValue::Null)]
        .into_iter()
        .collect();

    ConfigLayer::new("build")
        .with_value("DATABASES", databases)
        .with_value("XQUEUE_INTERFACE", xqueue)
        .with_value("STATIC_URL", STATIC_URL)
        .with_value("STATIC_ROOT", STATIC_ROOT)
        .with_value("DEFAULT_SITE_THEME", site_theme(lookup))
}

fn production_layer(lookup: &dyn ConfigurationSource) -> ConfigLayer {
    ConfigLayer::new("production")
        .with_value("STATIC_URL", STATIC_URL)
        .with_value("STATIC_ROOT", STATIC_ROOT)
        .with_value("DEFAULT_SITE_THEME", site_theme(lookup))
}

fn development_layer(lookup: &dyn ConfigurationSource) -> ConfigLayer {
    ConfigLayer::new("development")
        .with_patch(SENTRY_ENVIRONMENT_PATH, "development", PatchMode::IfPresent)
        .with_value("DEBUG", true)
        .with_value("REQUIRE_DEBUG", true)
        .with_value("EMAIL_BACKEND", email_backend(lookup))
        .with_value("PIPELINE_ENABLED", false)
        .with_value("STATICFILES_STORAGE", DEVELOPMENT_STATICFILES_STORAGE)
        .with_value("ALLOWED_HOSTS", vec![ConfigValue::from("*")])
}

fn staging_layer(lookup: &dyn ConfigurationSource) -> ConfigLayer {
    ConfigLayer::new("staging")
        .with_patch(SENTRY_ENVIRONMENT_PATH, "staging", PatchMode::IfPresent)
        .with_value("EMAIL_BACKEND", email_backend(lookup))
}
