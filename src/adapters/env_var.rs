// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable lookup source.
//!
//! Variables are matched by their exact name (after stripping an optional prefix), so
//! `EMAIL_BACKEND=...` answers a lookup of the `EMAIL_BACKEND` key.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, ENV_PRIORITY};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Lookup source backed by the process environment.
///
/// The environment is read once, on the first lookup, and the snapshot is kept for the
/// life of the adapter.
///
/// # Priority
///
/// Environment variables have a priority of 2: they override settings files
/// (priority 1) and are overridden by command-line overrides (priority 3).
///
/// # Examples
///
/// ```rust
/// use cms_settings::adapters::EnvVarAdapter;
///
/// // Every variable, by its own name
/// let adapter = EnvVarAdapter::new();
///
/// // Only CMS_* variables; CMS_EMAIL_BACKEND answers EMAIL_BACKEND
/// let adapter = EnvVarAdapter::with_prefix("CMS_").parse_values(true);
/// ```
#[derive(Debug)]
pub struct EnvVarAdapter {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to interpret values as scalars (`true`, `42`, ...) instead of strings
    parse_values: bool,
    /// Snapshot of the matching variables, taken on first use
    snapshot: OnceCell<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over every environment variable.
    pub fn new() -> Self {
        Self {
            prefix: None,
            parse_values: false,
            snapshot: OnceCell::new(),
        }
    }

    /// Creates an adapter over the variables starting with `prefix`.
    ///
    /// The prefix is stripped from the key.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether values are interpreted as scalars.
    ///
    /// When enabled, `DEBUG=true` yields a boolean and `PORT=8000` an integer, using
    /// [`ConfigValue::infer_scalar`]. Disabled by default: every value is a string.
    pub fn parse_values(mut self, enabled: bool) -> Self {
        self.parse_values = enabled;
        self
    }

    /// Creates an adapter with pre-populated values instead of the process environment.
    ///
    /// **Note**: This method is primarily intended for testing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cms_settings::adapters::EnvVarAdapter;
    /// use cms_settings::ports::ConfigSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("EMAIL_BACKEND".to_string(), "smtp".to_string());
    ///
    /// let adapter = EnvVarAdapter::with_values(values);
    /// assert!(adapter.get_str("EMAIL_BACKEND").unwrap().is_some());
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            snapshot: OnceCell::with_value(values),
            ..Self::new()
        }
    }

    /// Reads the matching environment variables.
    fn load(&self) -> HashMap<String, String> {
        let mut snapshot = HashMap::new();

        for (key, value) in env::vars_os() {
            let (key, value) = match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => (key, value),
                (key, _) => {
                    tracing::debug!(
                        "Skipping environment variable that is not valid UTF-8: {:?}",
                        key
                    );
                    continue;
                }
            };

            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let key = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(stripped) if !stripped.is_empty() => stripped.to_string(),
                    _ => continue,
                },
                None => key,
            };

            snapshot.insert(key, value);
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, parse_values={})",
            snapshot.len(),
            self.prefix,
            self.parse_values
        );

        snapshot
    }

    fn snapshot(&self) -> &HashMap<String, String> {
        self.snapshot.get_or_init(|| self.load())
    }

    fn to_value(&self, raw: &str) -> ConfigValue {
        if self.parse_values {
            ConfigValue::infer_scalar(raw)
        } else {
            ConfigValue::from(raw)
        }
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        ENV_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .snapshot()
            .get(key.as_str())
            .map(|raw| self.to_value(raw)))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .snapshot()
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
