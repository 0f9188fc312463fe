// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use cms_settings::domain::{ConfigKey, ConfigValue, Result};
use cms_settings::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

/// Sets environment variables and removes them again on drop.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// In-memory lookup source with a fixed priority.
#[allow(dead_code)]
pub struct MockConfigSource {
    name: String,
    priority: u8,
    values: HashMap<String, ConfigValue>,
}

#[allow(dead_code)]
impl MockConfigSource {
    pub fn new(name: &str, priority: u8) -> Self {
        Self {
            name: name.to_string(),
            priority,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl ConfigSource for MockConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

/// Writes `content` to a temporary file ending in `suffix`.
#[allow(dead_code)]
pub fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
