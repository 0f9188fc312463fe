// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup source trait definition.
//!
//! A `ConfigSource` is one place a per-deployment value can come from: environment
//! variables, a settings file, command-line overrides. Sources are snapshots taken
//! once at start-up; they are never reloaded.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// Priority of command-line `KEY=VALUE` overrides.
pub const CLI_PRIORITY: u8 = 3;

/// Priority of environment variables.
pub const ENV_PRIORITY: u8 = 2;

/// Priority of settings files.
pub const FILE_PRIORITY: u8 = 1;

/// A trait for lookup sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Priority
///
/// Each source has a priority value (0-255) that determines the order in which sources
/// are queried. Higher priority values take precedence over lower ones:
///
/// - **3 (highest)**: Command-line overrides
/// - **2**: Environment variables
/// - **1 (lowest)**: Settings files
///
/// Hardcoded defaults sit below every source; the caller passes them at lookup time.
///
/// # Examples
///
/// ```rust
/// use cms_settings::ports::ConfigSource;
/// use cms_settings::domain::{ConfigKey, ConfigValue, Result};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "EMAIL_BACKEND").then(|| ConfigValue::from("smtp")))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("EMAIL_BACKEND")])
///     }
/// }
///
/// assert!(Fixed.get_str("EMAIL_BACKEND").unwrap().is_some());
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this source, used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the priority of this source. Higher values win.
    fn priority(&self) -> u8;

    /// Retrieves the value for `key`.
    ///
    /// Returns `Ok(None)` if this source does not define the key.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns all keys this source defines.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Retrieves a value by string key. Equivalent to `get(&ConfigKey::from(key))`.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get(&ConfigKey::from(key))
    }
}
