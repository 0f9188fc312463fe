// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.env`-style layer files, parsed with `dotenvy`.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::ConfigParser;
use std::collections::{BTreeMap, HashSet};

/// Parser for `NAME=value` files.
///
/// Line syntax is that of `dotenvy`: comments, `export` prefixes, single and double
/// quotes and `$NAME` substitution all work as they do for a `.env` file.
///
/// - quoted values (`"..."` or `'...'`) are taken as strings
/// - unquoted values go through [`ConfigValue::infer_scalar`]
/// - a later assignment to the same name wins
///
/// # Examples
///
/// ```rust
/// use cms_settings::adapters::EnvFileParser;
/// use cms_settings::domain::ConfigValue;
/// use cms_settings::ports::ConfigParser;
///
/// let pairs = EnvFileParser::new().parse("DEBUG=true\nSTATIC_URL=\"/static/\"").unwrap();
/// assert_eq!(pairs.get("DEBUG"), Some(&ConfigValue::Bool(true)));
/// assert_eq!(pairs.get("STATIC_URL"), Some(&ConfigValue::from("/static/")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvFileParser;

impl EnvFileParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        EnvFileParser
    }

    /// Names whose last assignment has a quoted value.
    fn quoted_names(content: &str) -> HashSet<&str> {
        let mut quoted = HashSet::new();
        for line in content.lines() {
            let line = line.trim();
            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((name, raw)) = line.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if raw.trim_start().starts_with(['"', '\'']) {
                quoted.insert(name);
            } else {
                quoted.remove(name);
            }
        }
        quoted
    }
}

impl ConfigParser for EnvFileParser {
    fn parse(&self, content: &str) -> Result<BTreeMap<String, ConfigValue>> {
        let quoted = Self::quoted_names(content);
        let mut pairs = BTreeMap::new();

        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (name, raw) = item.map_err(|e| ConfigError::ParseError {
                message: format!("malformed .env content: {}", e),
                source: Some(Box::new(e)),
            })?;

            let value = if quoted.contains(name.as_str()) {
                ConfigValue::String(raw)
            } else {
                ConfigValue::infer_scalar(&raw)
            };
            pairs.insert(name, value);
        }

        Ok(pairs)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["env"]
    }
}
