// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named sets of settings assignments.
//!
//! A [`ConfigLayer`] is one step of an override chain such as
//! `base → production → development`. It holds plain top-level assignments, which
//! replace whatever an earlier layer set for the same key, and ordered
//! [`PathPatch`]es, which reach into an inherited mapping and change one nested entry.

use crate::domain::{ConfigKey, ConfigValue};
use std::collections::BTreeMap;

/// How a [`PathPatch`] behaves when the mapping it targets does not exist yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchMode {
    /// Create any missing intermediate mappings.
    Create,
    /// Skip the patch unless the parent mapping already exists.
    IfPresent,
}

/// An assignment to a nested location, e.g. `LOGGING.handlers.sentry.environment`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPatch {
    path: ConfigKey,
    value: ConfigValue,
    mode: PatchMode,
}

impl PathPatch {
    /// Creates a patch of `path` to `value`.
    pub fn new(path: impl Into<ConfigKey>, value: impl Into<ConfigValue>, mode: PatchMode) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            mode,
        }
    }

    /// The dotted path being assigned.
    pub fn path(&self) -> &ConfigKey {
        &self.path
    }

    /// The value written at the path.
    pub fn value(&self) -> &ConfigValue {
        &self.value
    }

    /// What happens when the target mapping is missing.
    pub fn mode(&self) -> PatchMode {
        self.mode
    }
}

/// A named set of settings assignments applied as one step of resolution.
///
/// # Examples
///
/// ```
/// use cms_settings::domain::{ConfigLayer, ConfigValue, PatchMode};
///
/// let layer = ConfigLayer::new("development")
///     .with_value("DEBUG", true)
///     .with_value("ALLOWED_HOSTS", vec![ConfigValue::from("*")])
///     .with_patch("LOGGING.handlers.sentry.environment", "development", PatchMode::IfPresent);
///
/// assert_eq!(layer.name(), "development");
/// assert_eq!(layer.len(), 2);
/// assert_eq!(layer.patches().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigLayer {
    name: String,
    values: BTreeMap<ConfigKey, ConfigValue>,
    patches: Vec<PathPatch>,
}

impl ConfigLayer {
    /// Creates an empty layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            patches: Vec::new(),
        }
    }

    /// Builds a layer from name/value pairs as read from a file.
    ///
    /// Keys containing `.` become [`PatchMode::Create`] patches, in key order; all other
    /// keys are plain assignments.
    pub fn from_pairs<I, K, V>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ConfigKey>,
        V: Into<ConfigValue>,
    {
        let mut layer = Self::new(name);
        for (key, value) in pairs {
            let key = key.into();
            if key.is_path() {
                layer.patches.push(PathPatch::new(key, value, PatchMode::Create));
            } else {
                layer.values.insert(key, value.into());
            }
        }
        layer
    }

    /// Adds a plain assignment.
    pub fn with_value(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds a nested assignment.
    pub fn with_patch(
        mut self,
        path: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
        mode: PatchMode,
    ) -> Self {
        self.patches.push(PathPatch::new(path, value, mode));
        self
    }

    /// Sets a plain assignment, replacing an earlier one for the same key.
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// The layer's name, used for provenance and logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a plain assignment made by this layer.
    pub fn get(&self, key: &ConfigKey) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Iterates over the plain assignments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.values.iter()
    }

    /// The nested assignments in application order.
    pub fn patches(&self) -> &[PathPatch] {
        &self.patches
    }

    /// Number of plain assignments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the layer assigns nothing at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.patches.is_empty()
    }
}
