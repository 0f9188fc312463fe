// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line override lookup source.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, CLI_PRIORITY};
use std::collections::HashMap;

/// Lookup source for overrides given on the command line.
///
/// Three argument forms are understood:
/// - `KEY=VALUE`: bare assignment, as collected from a repeated `--set` option
/// - `--KEY=VALUE`: long form with equals sign
/// - `--KEY VALUE`: long form with space-separated value
///
/// Values go through [`ConfigValue::infer_scalar`], so `DEBUG=true` is a boolean.
/// Anything else is ignored. When a key repeats, the last value wins.
///
/// # Priority
///
/// Command-line overrides have the highest priority (3), which means they override
/// both environment variables (priority 2) and settings files (priority 1).
///
/// # Examples
///
/// ```rust
/// use cms_settings::adapters::CommandLineAdapter;
/// use cms_settings::domain::ConfigValue;
/// use cms_settings::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(vec!["EMAIL_BACKEND=smtp", "--DEBUG", "false"]);
/// assert_eq!(adapter.get_str("DEBUG").unwrap(), Some(ConfigValue::Bool(false)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    /// Parsed override values
    values: HashMap<String, String>,
}

impl CommandLineAdapter {
    /// Creates an adapter with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter from a list of arguments.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(args);
        adapter
    }

    /// Parses command-line arguments and populates the values map.
    fn parse_args<S: AsRef<str>>(&mut self, args: Vec<S>) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();

            if let Some(flag) = arg.strip_prefix("--") {
                // --KEY=VALUE
                if let Some((key, value)) = flag.split_once('=') {
                    self.insert(key, value);
                    i += 1;
                    continue;
                }
                // --KEY VALUE, unless the next argument is another flag
                match args.get(i + 1).map(|next| next.as_ref()) {
                    Some(next) if !next.starts_with('-') => {
                        self.insert(flag, next);
                        i += 2;
                    }
                    _ => i += 1,
                }
            } else {
                // KEY=VALUE
                if let Some((key, value)) = arg.split_once('=') {
                    self.insert(key, value);
                }
                i += 1;
            }
        }
    }

    fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim();
        if key.is_empty() {
            tracing::debug!("Ignoring command-line override with an empty name");
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        CLI_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::infer_scalar(v)))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
