// SPDX-License-Identifier: MIT OR Apache-2.0

//! Precedence-ordered lookup of per-deployment values.
//!
//! The settings layers read a handful of toggles (mail backend, site theme) from the
//! deployment. The [`EnvironmentResolver`] asks its sources in priority order and
//! falls back to the caller's hardcoded default.

use crate::domain::{ConfigKey, ConfigValue, ConfigurationSource, Result};
use crate::ports::ConfigSource;

/// Aggregates lookup sources by priority.
///
/// Sources with higher priority values are queried first and the first value found is
/// returned. With the built-in adapters that gives
/// command line > environment variables > settings file > default.
///
/// # Examples
///
/// ```rust
/// use cms_settings::service::EnvironmentResolver;
///
/// let resolver = EnvironmentResolver::builder()
///     .with_env_vars()
///     .build();
///
/// let backend = resolver.resolve_environment_value(
///     "CMS_SETTINGS_DOCTEST_UNSET_BACKEND",
///     "django.core.mail.backends.console.EmailBackend",
/// );
/// assert_eq!(backend.as_str(), Some("django.core.mail.backends.console.EmailBackend"));
/// ```
pub struct EnvironmentResolver {
    /// List of sources, maintained in priority order (highest first)
    sources: Vec<Box<dyn ConfigSource>>,
}

impl EnvironmentResolver {
    /// Creates a resolver without sources; every lookup returns its default.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Creates a new resolver builder.
    pub fn builder() -> EnvironmentResolverBuilder {
        EnvironmentResolverBuilder::new()
    }

    /// Creates a resolver with the default sources.
    ///
    /// This includes environment variables and `config.yaml` from the OS-appropriate
    /// configuration directory. If that file doesn't exist, only environment
    /// variables are used.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "org.openedx")
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Self {
        #[allow(unused_mut)]
        let mut builder = Self::builder();

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_vars();
        }

        #[cfg(feature = "yaml")]
        {
            use crate::adapters::YamlFileAdapter;
            match YamlFileAdapter::from_default_location(app_name, qualifier) {
                Ok(adapter) => builder = builder.with_source(Box::new(adapter)),
                Err(e) => tracing::debug!("No default settings file: {}", e),
            }
        }
        #[cfg(not(feature = "yaml"))]
        let _ = (app_name, qualifier);

        builder.build()
    }

    /// Adds a source. Sources are kept sorted by priority.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
        // stable sort keeps insertion order among equal priorities
        self.sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
    }

    /// Names of the sources in query order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Looks up an external override for `key`, returning `default` if none is set.
    pub fn resolve_environment_value(
        &self,
        key: &str,
        default: impl Into<ConfigValue>,
    ) -> ConfigValue {
        let key = ConfigKey::from(key);
        match self.query_sources(&key) {
            Some(value) => value,
            None => {
                let default = default.into();
                tracing::debug!("No override for '{}', using default '{}'", key, default);
                default
            }
        }
    }

    /// Queries all sources for a value, respecting priority order.
    fn query_sources(&self, key: &ConfigKey) -> Option<ConfigValue> {
        for source in &self.sources {
            match source.get(key) {
                Ok(Some(value)) => {
                    tracing::debug!("Resolved '{}' from source '{}'", key, source.name());
                    return Some(value);
                }
                Ok(None) => continue,
                Err(e) => {
                    // Log the error but continue to next source
                    tracing::debug!(
                        "Error querying source '{}' for key '{}': {}",
                        source.name(),
                        key,
                        e
                    );
                    continue;
                }
            }
        }
        None
    }
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationSource for EnvironmentResolver {
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
        self.query_sources(key)
    }
}

/// Builder for constructing an [`EnvironmentResolver`].
///
/// # Examples
///
/// ```rust,no_run
/// use cms_settings::service::EnvironmentResolverBuilder;
///
/// # fn main() -> cms_settings::domain::Result<()> {
/// let resolver = EnvironmentResolverBuilder::new()
///     .with_yaml_file("/edx/etc/cms.yml")?
///     .with_env_prefix("CMS_")
///     .with_cli_overrides(vec!["EMAIL_BACKEND=smtp"])
///     .build();
/// # Ok(())
/// # }
/// ```
pub struct EnvironmentResolverBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl EnvironmentResolverBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds every environment variable, matched by exact name.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::new()))
    }

    /// Adds the environment variables starting with `prefix`, matched with the prefix
    /// stripped.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::with_prefix(prefix)))
    }

    /// Adds command-line `KEY=VALUE` overrides.
    #[cfg(feature = "cli")]
    pub fn with_cli_overrides<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineAdapter;
        self.with_source(Box::new(CommandLineAdapter::from_args(args)))
    }

    /// Adds a YAML settings file.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileAdapter;
        let adapter = YamlFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Builds the resolver.
    pub fn build(self) -> EnvironmentResolver {
        let mut resolver = EnvironmentResolver::new();

        for source in self.sources {
            resolver.add_source(source);
        }

        tracing::debug!(
            "Environment resolver sources: {:?}",
            resolver.source_names()
        );

        resolver
    }
}

impl Default for EnvironmentResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
