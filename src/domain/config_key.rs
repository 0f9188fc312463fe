// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings key newtype.
//!
//! Keys name top-level settings such as `STATIC_URL` or `DATABASES`. A key containing
//! a `.` is a path into a nested mapping, e.g. `LOGGING.handlers.sentry.environment`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the segments of a path key.
pub const PATH_SEPARATOR: char = '.';

/// A type-safe wrapper for settings keys.
///
/// # Examples
///
/// ```
/// use cms_settings::domain::ConfigKey;
///
/// let key = ConfigKey::from("LOGGING.handlers.sentry.environment");
/// assert!(key.is_path());
/// assert_eq!(key.root(), "LOGGING");
/// assert_eq!(key.segments().count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the key addresses a nested value.
    pub fn is_path(&self) -> bool {
        self.0.contains(PATH_SEPARATOR)
    }

    /// Iterates over the path segments of the key.
    ///
    /// A plain key yields a single segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }

    /// Returns the first segment, i.e. the top-level setting name.
    pub fn root(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_config_key_from_str() {
        let key = ConfigKey::from("STATIC_URL");
        assert_eq!(key.as_str(), "STATIC_URL");
        assert_eq!(key.into_string(), "STATIC_URL");
    }

    #[test]
    fn test_config_key_display() {
        let key = ConfigKey::from("EMAIL_BACKEND");
        assert_eq!(format!("{}", key), "EMAIL_BACKEND");
    }

    #[test]
    fn test_plain_key_is_not_path() {
        let key = ConfigKey::from("ALLOWED_HOSTS");
        assert!(!key.is_path());
        assert_eq!(key.root(), "ALLOWED_HOSTS");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["ALLOWED_HOSTS"]);
    }

    #[test]
    fn test_path_key_segments() {
        let key = ConfigKey::from("LOGGING.handlers.sentry.environment");
        assert!(key.is_path());
        assert_eq!(key.root(), "LOGGING");
        assert_eq!(
            key.segments().collect::<Vec<_>>(),
            vec!["LOGGING", "handlers", "sentry", "environment"]
        );
    }

    #[test]
    fn test_config_key_ordering() {
        let mut map = BTreeMap::new();
        map.insert(ConfigKey::from("STATIC_URL"), 1);
        map.insert(ConfigKey::from("DEBUG"), 2);
        map.insert(ConfigKey::from("ALLOWED_HOSTS"), 3);

        let keys: Vec<_> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["ALLOWED_HOSTS", "DEBUG", "STATIC_URL"]);
    }

    #[test]
    fn test_config_key_empty() {
        let key = ConfigKey::from("");
        assert_eq!(key.root(), "");
        assert!(!key.is_path());
    }
}
