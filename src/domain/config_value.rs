// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings value type with typed accessors.
//!
//! A settings value is a small tree: scalars (null, boolean, integer, float, string)
//! plus lists and string-keyed mappings, which is what settings such as `DATABASES`
//! or `ALLOWED_HOSTS` need.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A settings value.
///
/// # Examples
///
/// ```
/// use cms_settings::domain::ConfigValue;
///
/// let value = ConfigValue::from(vec![ConfigValue::from("*")]);
/// assert_eq!(value.as_list().map(|l| l.len()), Some(1));
///
/// let value = ConfigValue::from(true);
/// assert_eq!(value.as_bool("DEBUG").unwrap(), true);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// No value (`None` / `null`).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A string-keyed mapping of values.
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Creates an empty mapping value.
    pub fn empty_map() -> Self {
        ConfigValue::Map(BTreeMap::new())
    }

    /// Interprets a raw string the way `.env` files and environment variables are read.
    ///
    /// `true`/`false` become booleans, `null`/`none`/`~` become `Null`, numbers become
    /// integers or floats. Anything else, including the empty string, stays a string.
    ///
    /// ```
    /// use cms_settings::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::infer_scalar("true"), ConfigValue::Bool(true));
    /// assert_eq!(ConfigValue::infer_scalar("8000"), ConfigValue::Integer(8000));
    /// assert_eq!(ConfigValue::infer_scalar("/static/"), ConfigValue::from("/static/"));
    /// ```
    pub fn infer_scalar(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "true" => return ConfigValue::Bool(true),
            "false" => return ConfigValue::Bool(false),
            "null" | "none" | "~" => return ConfigValue::Null,
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return ConfigValue::Integer(i);
        }
        // "inf"/"nan" parse as floats but are almost always meant as strings
        if trimmed.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return ConfigValue::Float(f);
            }
        }
        ConfigValue::String(raw.to_string())
    }

    /// Returns a short name for the kind of value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "mapping",
        }
    }

    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is a list value.
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping if this is a mapping value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// Strings are accepted when they spell a boolean (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(ConfigError::type_mismatch(key, "boolean", other)),
        }
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(i) => Ok(*i),
            ConfigValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(ConfigError::type_mismatch(key, "integer", other)),
        }
    }

    /// Converts the value to an `f64`. Integers widen.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(i) => Ok(*i as f64),
            ConfigValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(ConfigError::type_mismatch(key, "float", other)),
        }
    }

    /// Parses a scalar value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_settings::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("BIND_ADDRESS").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ConfigValue::List(_) | ConfigValue::Map(_) | ConfigValue::Null => Err(
                ConfigError::type_mismatch(key, std::any::type_name::<T>(), self),
            ),
            scalar => scalar
                .to_string()
                .parse::<T>()
                .map_err(|e| ConfigError::TypeConversionError {
                    key: key.to_string(),
                    target_type: std::any::type_name::<T>().to_string(),
                    source: Box::new(e),
                }),
        }
    }

    /// Follows `segments` through nested mappings.
    ///
    /// An empty path returns `self`. Lists are indexed by numeric segments.
    pub fn get_path<'a, I>(&self, segments: I) -> Option<&ConfigValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = match current {
                ConfigValue::Map(map) => map.get(segment)?,
                ConfigValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Assigns `value` at `segments` below this value.
    ///
    /// With `create` set, missing intermediate mappings are created and a `Null` on the
    /// way is replaced by a mapping. Without it, every mapping on the path except the
    /// final key must already exist. Non-mapping values on the path are never replaced.
    ///
    /// Returns `true` if the assignment happened.
    pub fn set_path(&mut self, segments: &[&str], value: ConfigValue, create: bool) -> bool {
        let Some((first, rest)) = segments.split_first() else {
            *self = value;
            return true;
        };

        if create && self.is_null() {
            *self = ConfigValue::empty_map();
        }

        let ConfigValue::Map(map) = self else {
            return false;
        };

        if rest.is_empty() {
            map.insert((*first).to_string(), value);
            return true;
        }

        match map.get_mut(*first) {
            Some(child) => child.set_path(rest, value, create),
            None if create => map
                .entry((*first).to_string())
                .or_insert_with(ConfigValue::empty_map)
                .set_path(rest, value, create),
            None => false,
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConfigValue::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Floats compare by bit pattern so that `NaN` equals itself.
impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConfigValue::Null, ConfigValue::Null) => true,
            (ConfigValue::Bool(a), ConfigValue::Bool(b)) => a == b,
            (ConfigValue::Integer(a), ConfigValue::Integer(b)) => a == b,
            (ConfigValue::Float(a), ConfigValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
            (ConfigValue::List(a), ConfigValue::List(b)) => a == b,
            (ConfigValue::Map(a), ConfigValue::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
