// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup-with-default interface.
//!
//! Settings layers read per-deployment toggles, such as the mail backend, through a
//! `ConfigurationSource`. Absent keys are never an error there: the caller always
//! supplies the default.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};

/// A provider of key lookups with a caller-supplied fallback.
///
/// Only [`lookup`](ConfigurationSource::lookup) has to be implemented.
///
/// # Examples
///
/// ```rust
/// use cms_settings::domain::{ConfigKey, ConfigValue, ConfigurationSource};
///
/// struct Nothing;
///
/// impl ConfigurationSource for Nothing {
///     fn lookup(&self, _key: &ConfigKey) -> Option<ConfigValue> {
///         None
///     }
/// }
///
/// let value = Nothing.get(&ConfigKey::from("EMAIL_BACKEND"), ConfigValue::from("console"));
/// assert_eq!(value, ConfigValue::from("console"));
/// ```
pub trait ConfigurationSource {
    /// Returns the value for `key`, or `None` when no source defines it.
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue>;

    /// Returns the value for `key`, or `default` when it is absent.
    fn get(&self, key: &ConfigKey, default: ConfigValue) -> ConfigValue {
        self.lookup(key).unwrap_or(default)
    }

    /// Returns the value for `key`, failing with `ConfigKeyNotFound` when it is absent.
    fn require(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.lookup(key).ok_or_else(|| ConfigError::ConfigKeyNotFound {
            key: key.as_str().to_string(),
        })
    }

    /// Returns `true` if `key` is defined.
    fn has(&self, key: &ConfigKey) -> bool {
        self.lookup(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<String, ConfigValue>);

    impl ConfigurationSource for MapSource {
        fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
            self.0.get(key.as_str()).cloned()
        }
    }

    fn source() -> MapSource {
        let mut values = HashMap::new();
        values.insert("DEFAULT_SITE_THEME".to_string(), ConfigValue::from("fun"));
        MapSource(values)
    }

    #[test]
    fn test_get_present_key() {
        let value = source().get(&ConfigKey::from("DEFAULT_SITE_THEME"), ConfigValue::Null);
        assert_eq!(value, ConfigValue::from("fun"));
    }

    #[test]
    fn test_get_missing_key_uses_default() {
        let value = source().get(
            &ConfigKey::from("EMAIL_BACKEND"),
            ConfigValue::from("console"),
        );
        assert_eq!(value, ConfigValue::from("console"));
    }

    #[test]
    fn test_require() {
        let source = source();
        assert!(source.require(&ConfigKey::from("DEFAULT_SITE_THEME")).is_ok());
        let err = source.require(&ConfigKey::from("SECRET_KEY")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigKeyNotFound { .. }));
    }

    #[test]
    fn test_has() {
        let source = source();
        assert!(source.has(&ConfigKey::from("DEFAULT_SITE_THEME")));
        assert!(!source.has(&ConfigKey::from("DEBUG")));
    }
}
