// SPDX-License-Identifier: MIT OR Apache-2.0

//! The immutable result of applying a chain of layers.

use crate::domain::{ConfigKey, ConfigLayer, ConfigValue, ConfigurationSource, PatchMode};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// The final, read-only settings mapping handed to the application.
///
/// A `ResolvedConfiguration` is never mutated: [`apply_override`] returns a new value
/// and leaves the receiver untouched. It only exposes `&self` accessors and is
/// `Send + Sync`, so one instance can be shared (e.g. behind an `Arc`) by any number
/// of threads.
///
/// Besides the values, it records which layers were applied and which layer last
/// wrote each key.
///
/// [`apply_override`]: ResolvedConfiguration::apply_override
///
/// # Examples
///
/// ```
/// use cms_settings::domain::{ConfigKey, ConfigLayer, ConfigValue, ResolvedConfiguration};
///
/// let base = ConfigLayer::new("base")
///     .with_value("STATIC_URL", "/static/")
///     .with_value("DEBUG", false);
/// let debug = ConfigLayer::new("debug").with_value("DEBUG", true);
///
/// let resolved = ResolvedConfiguration::empty()
///     .apply_override(&base)
///     .apply_override(&debug);
///
/// assert_eq!(resolved.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(true)));
/// assert_eq!(resolved.get(&ConfigKey::from("STATIC_URL")), Some(&ConfigValue::from("/static/")));
/// assert_eq!(resolved.origin(&ConfigKey::from("DEBUG")), Some("debug"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedConfiguration {
    values: BTreeMap<ConfigKey, ConfigValue>,
    origins: BTreeMap<ConfigKey, String>,
    layers: Vec<String>,
}

impl ResolvedConfiguration {
    /// The starting point of every resolution: no keys, no layers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new configuration with `layer` applied on top of this one.
    ///
    /// Every plain key of `layer` replaces this configuration's value for that key and
    /// keys only present here are kept unchanged. Patches are applied afterwards, in
    /// order. A patch in [`PatchMode::IfPresent`] whose target mapping is missing is
    /// skipped.
    pub fn apply_override(&self, layer: &ConfigLayer) -> Self {
        let mut next = self.clone();

        for (key, value) in layer.iter() {
            next.values.insert(key.clone(), value.clone());
            next.origins.insert(key.clone(), layer.name().to_string());
        }

        for patch in layer.patches() {
            let path = patch.path();
            let root = ConfigKey::from(path.root());
            let rest: Vec<&str> = path.segments().skip(1).collect();
            let create = patch.mode() == PatchMode::Create;

            let applied = match next.values.get_mut(&root) {
                Some(target) => target.set_path(&rest, patch.value().clone(), create),
                None if create => {
                    let mut target = ConfigValue::Null;
                    let applied = target.set_path(&rest, patch.value().clone(), true);
                    next.values.insert(root.clone(), target);
                    applied
                }
                None => false,
            };

            if applied {
                next.origins.insert(root, layer.name().to_string());
            } else {
                tracing::debug!(
                    "Layer '{}' skipped patch '{}': target mapping not present",
                    layer.name(),
                    path
                );
            }
        }

        next.layers.push(layer.name().to_string());
        next
    }

    /// Looks up a value. Dotted keys that are not top-level names are followed into
    /// nested mappings.
    pub fn get(&self, key: &ConfigKey) -> Option<&ConfigValue> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }
        if !key.is_path() {
            return None;
        }
        self.values
            .get(&ConfigKey::from(key.root()))?
            .get_path(key.segments().skip(1))
    }

    /// Looks up a value, falling back to `default` when the key is absent.
    pub fn get_or<V: Into<ConfigValue>>(&self, key: &ConfigKey, default: V) -> ConfigValue {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Returns `true` if the key resolves to a value.
    pub fn contains_key(&self, key: &ConfigKey) -> bool {
        self.get(key).is_some()
    }

    /// Name of the layer that last wrote the top-level setting of `key`.
    pub fn origin(&self, key: &ConfigKey) -> Option<&str> {
        self.origins
            .get(key)
            .or_else(|| self.origins.get(&ConfigKey::from(key.root())))
            .map(String::as_str)
    }

    /// Names of the applied layers, in application order.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Iterates over the top-level settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.values.iter()
    }

    /// Iterates over the top-level keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.values.keys()
    }

    /// Number of top-level settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if both configurations hold the same values, regardless of
    /// which layers produced them.
    pub fn same_values(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl ConfigurationSource for ResolvedConfiguration {
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
        self.get(key).cloned()
    }
}

impl Serialize for ResolvedConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging_layer() -> ConfigLayer {
        let sentry: ConfigValue = [("level", "ERROR")].into_iter().collect();
        let handlers: ConfigValue = [("sentry", sentry)].into_iter().collect();
        let logging: ConfigValue = [("handlers", handlers)].into_iter().collect();
        ConfigLayer::new("base").with_value("LOGGING", logging)
    }

    #[test]
    fn test_debug_override_example() {
        let base = ConfigLayer::new("base")
            .with_value("STATIC_URL", "/static/")
            .with_value("DEBUG", false);
        let overlay = ConfigLayer::new("overlay").with_value("DEBUG", true);

        let resolved = ResolvedConfiguration::empty()
            .apply_override(&base)
            .apply_override(&overlay);

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved.get(&ConfigKey::from("STATIC_URL")),
            Some(&ConfigValue::from("/static/"))
        );
        assert_eq!(
            resolved.get(&ConfigKey::from("DEBUG")),
            Some(&ConfigValue::Bool(true))
        );
        assert_eq!(resolved.layers(), &["base".to_string(), "overlay".to_string()]);
    }

    #[test]
    fn test_apply_override_leaves_receiver_untouched() {
        let base = ResolvedConfiguration::empty()
            .apply_override(&ConfigLayer::new("base").with_value("DEBUG", false));
        let snapshot = base.clone();

        let _next = base.apply_override(&ConfigLayer::new("dev").with_value("DEBUG", true));

        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_empty_layer_keeps_values() {
        let base = ResolvedConfiguration::empty().apply_override(&logging_layer());
        let next = base.apply_override(&ConfigLayer::new("noop"));

        assert!(next.same_values(&base));
        assert_eq!(next.layers().len(), 2);
    }

    #[test]
    fn test_if_present_patch_applies_to_existing_handler() {
        let dev = ConfigLayer::new("development").with_patch(
            "LOGGING.handlers.sentry.environment",
            "development",
            PatchMode::IfPresent,
        );
        let resolved = ResolvedConfiguration::empty()
            .apply_override(&logging_layer())
            .apply_override(&dev);

        let key = ConfigKey::from("LOGGING.handlers.sentry.environment");
        assert_eq!(resolved.get(&key), Some(&ConfigValue::from("development")));
        assert_eq!(
            resolved.get(&ConfigKey::from("LOGGING.handlers.sentry.level")),
            Some(&ConfigValue::from("ERROR"))
        );
        assert_eq!(resolved.origin(&key), Some("development"));
    }

    #[test]
    fn test_if_present_patch_skips_missing_handler() {
        let dev = ConfigLayer::new("development").with_patch(
            "LOGGING.handlers.sentry.environment",
            "development",
            PatchMode::IfPresent,
        );
        let resolved = ResolvedConfiguration::empty().apply_override(&dev);

        assert!(resolved.is_empty());
        assert_eq!(resolved.layers(), &["development".to_string()]);
    }

    #[test]
    fn test_create_patch_builds_missing_mappings() {
        let staging = ConfigLayer::new("staging").with_patch(
            "LOGGING.handlers.sentry.environment",
            "staging",
            PatchMode::Create,
        );
        let resolved = ResolvedConfiguration::empty().apply_override(&staging);

        assert_eq!(
            resolved.get(&ConfigKey::from("LOGGING.handlers.sentry.environment")),
            Some(&ConfigValue::from("staging"))
        );
        assert_eq!(resolved.origin(&ConfigKey::from("LOGGING")), Some("staging"));
    }

    #[test]
    fn test_get_or_default() {
        let resolved = ResolvedConfiguration::empty();
        assert_eq!(
            resolved.get_or(&ConfigKey::from("EMAIL_BACKEND"), "console"),
            ConfigValue::from("console")
        );
        assert!(!resolved.contains_key(&ConfigKey::from("EMAIL_BACKEND")));
    }

    #[test]
    fn test_configuration_source_impl() {
        let resolved = ResolvedConfiguration::empty()
            .apply_override(&ConfigLayer::new("base").with_value("DEFAULT_SITE_THEME", "red"));
        let source: &dyn ConfigurationSource = &resolved;

        assert_eq!(
            source.get(&ConfigKey::from("DEFAULT_SITE_THEME"), ConfigValue::Null),
            ConfigValue::from("red")
        );
        assert!(source.require(&ConfigKey::from("SECRET_KEY")).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let resolved = std::sync::Arc::new(
            ResolvedConfiguration::empty()
                .apply_override(&ConfigLayer::new("base").with_value("STATIC_URL", "/static/")),
        );

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let resolved = std::sync::Arc::clone(&resolved);
                scope.spawn(move || {
                    assert_eq!(
                        resolved.get(&ConfigKey::from("STATIC_URL")),
                        Some(&ConfigValue::from("/static/"))
                    );
                });
            }
        });
    }
}
