// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered application of layers.

use crate::adapters::LayerFileLoader;
use crate::domain::{ConfigLayer, ResolvedConfiguration, Result};
use std::path::Path;

/// Applies an ordered list of layers, later layers overriding earlier ones.
///
/// # Examples
///
/// ```rust
/// use cms_settings::domain::{ConfigKey, ConfigLayer, ConfigValue};
/// use cms_settings::service::LayerResolver;
///
/// let resolved = LayerResolver::new()
///     .with_layer(ConfigLayer::new("base").with_value("STATIC_URL", "/static/").with_value("DEBUG", false))
///     .with_layer(ConfigLayer::new("development").with_value("DEBUG", true))
///     .resolve();
///
/// assert_eq!(resolved.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(true)));
/// assert_eq!(resolved.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayerResolver {
    layers: Vec<ConfigLayer>,
}

impl LayerResolver {
    /// Creates a resolver with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer.
    pub fn with_layer(mut self, layer: ConfigLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Appends several layers, in order.
    pub fn with_layers<I: IntoIterator<Item = ConfigLayer>>(mut self, layers: I) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Loads a layer file and appends it.
    ///
    /// Fails with `LoadError` if the file is unreadable or malformed.
    pub fn with_layer_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let layer = LayerFileLoader::new().load(path)?;
        Ok(self.with_layer(layer))
    }

    /// The layers in application order.
    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// Applies every layer over an empty configuration.
    pub fn resolve(&self) -> ResolvedConfiguration {
        let resolved = resolve_layers(&self.layers);
        tracing::info!(
            "Resolved {} settings from layers {:?}",
            resolved.len(),
            resolved.layers()
        );
        resolved
    }
}

/// Folds `apply_override` over `layers`, starting from an empty configuration.
pub fn resolve_layers<'a, I>(layers: I) -> ResolvedConfiguration
where
    I: IntoIterator<Item = &'a ConfigLayer>,
{
    layers
        .into_iter()
        .fold(ResolvedConfiguration::empty(), |acc, layer| {
            acc.apply_override(layer)
        })
}
