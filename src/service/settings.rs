// SPDX-License-Identifier: MIT OR Apache-2.0

//! Start-up entry point: build the full layer chain for one environment.
//!
//! The chain is, in order:
//!
//! 1. the shared base settings (a file and/or in-memory layers)
//! 2. the built-in profile of the selected [`Environment`]
//! 3. overlay files, e.g. a deployment-specific `local.yaml`
//! 4. in-memory layers added last
//!
//! Every file is loaded before anything is applied, so a broken overlay aborts with a
//! `LoadError` and no configuration at all.

use crate::adapters::LayerFileLoader;
use crate::domain::{
    ConfigLayer, ConfigurationSource, Environment, ResolvedConfiguration, Result,
};
use crate::ports::ConfigParser;
use crate::service::LayerResolver;
use std::path::PathBuf;

/// Builder for the resolved settings of one environment.
///
/// # Examples
///
/// ```rust
/// use cms_settings::domain::{ConfigKey, ConfigLayer, ConfigValue, Environment};
/// use cms_settings::service::{EnvironmentResolver, SettingsBuilder};
///
/// # fn main() -> cms_settings::domain::Result<()> {
/// let lookup = EnvironmentResolver::new();
/// let settings = SettingsBuilder::new(Environment::Staging)
///     .with_base_layer(ConfigLayer::new("common").with_value("TIME_ZONE", "UTC"))
///     .build(&lookup)?;
///
/// assert_eq!(settings.get(&ConfigKey::from("TIME_ZONE")), Some(&ConfigValue::from("UTC")));
/// assert_eq!(settings.layers(), &["common", "production", "staging"]);
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    environment: Environment,
    base_files: Vec<PathBuf>,
    base_layers: Vec<ConfigLayer>,
    overlay_files: Vec<PathBuf>,
    extra_layers: Vec<ConfigLayer>,
    loader: LayerFileLoader,
}

impl SettingsBuilder {
    /// Starts a chain for `environment`.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            base_files: Vec::new(),
            base_layers: Vec::new(),
            overlay_files: Vec::new(),
            extra_layers: Vec::new(),
            loader: LayerFileLoader::new(),
        }
    }

    /// Adds a base settings file, applied before the environment profile.
    pub fn with_base_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_files.push(path.into());
        self
    }

    /// Adds an in-memory base layer, applied after base files and before the
    /// environment profile.
    pub fn with_base_layer(mut self, layer: ConfigLayer) -> Self {
        self.base_layers.push(layer);
        self
    }

    /// Adds an overlay file, applied after the environment profile.
    pub fn with_overlay_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay_files.push(path.into());
        self
    }

    /// Adds an in-memory layer, applied last.
    pub fn with_layer(mut self, layer: ConfigLayer) -> Self {
        self.extra_layers.push(layer);
        self
    }

    /// Registers an extra layer file parser.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.loader = self.loader.with_parser(parser);
        self
    }

    /// The selected environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Loads every file and resolves the whole chain.
    ///
    /// `lookup` answers the per-deployment toggles read by the environment profile.
    pub fn build(self, lookup: &dyn ConfigurationSource) -> Result<ResolvedConfiguration> {
        let base_files = self.load_all(&self.base_files)?;
        let overlays = self.load_all(&self.overlay_files)?;

        let resolver = LayerResolver::new()
            .with_layers(base_files)
            .with_layers(self.base_layers)
            .with_layers(self.environment.layers(lookup))
            .with_layers(overlays)
            .with_layers(self.extra_layers);

        tracing::debug!(
            "Resolving '{}' settings from {} layers",
            self.environment,
            resolver.layers().len()
        );

        Ok(resolver.resolve())
    }

    fn load_all(&self, paths: &[PathBuf]) -> Result<Vec<ConfigLayer>> {
        paths.iter().map(|path| self.loader.load(path)).collect()
    }
}

/// Resolves the built-in chain for `environment` with no base or overlays.
pub fn resolve_environment(
    environment: Environment,
    lookup: &dyn ConfigurationSource,
) -> ResolvedConfiguration {
    LayerResolver::new()
        .with_layers(environment.layers(lookup))
        .resolve()
}
