// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML settings files.
//!
//! [`YamlParser`] reads YAML (and therefore JSON) layer files. [`YamlFileAdapter`]
//! exposes a YAML settings file as a lookup source for per-deployment toggles.

use crate::adapters::layer_file::read_source;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource, FILE_PRIORITY};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// YAML parser implementation.
///
/// The document root must be a mapping (or empty). Its keys become setting names and
/// its values are kept as nested [`ConfigValue`]s.
///
/// # Examples
///
/// ```rust
/// use cms_settings::adapters::YamlParser;
/// use cms_settings::domain::ConfigValue;
/// use cms_settings::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let result = parser.parse("ALLOWED_HOSTS: ['*']\nDEBUG: true").unwrap();
/// assert_eq!(result.get("DEBUG"), Some(&ConfigValue::Bool(true)));
/// assert_eq!(result.get("ALLOWED_HOSTS").and_then(|v| v.as_list()).map(|l| l.len()), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Converts a YAML node into a settings value.
    fn convert(value: serde_yaml::Value) -> Result<ConfigValue> {
        Ok(match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => ConfigValue::List(
                seq.into_iter()
                    .map(Self::convert)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_yaml::Value::Mapping(map) => ConfigValue::Map(Self::convert_mapping(map)?),
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value)?,
        })
    }

    fn convert_mapping(map: serde_yaml::Mapping) -> Result<BTreeMap<String, ConfigValue>> {
        let mut result = BTreeMap::new();
        for (key, value) in map {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ConfigError::ParseError {
                        message: format!("Unsupported mapping key: {:?}", other),
                        source: None,
                    })
                }
            };
            result.insert(key, Self::convert(value)?);
        }
        Ok(result)
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<BTreeMap<String, ConfigValue>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_yaml::Value::Null => Ok(BTreeMap::new()),
            serde_yaml::Value::Mapping(map) => Self::convert_mapping(map),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "Document root must be a mapping of setting names, found {}",
                    Self::convert(other)?.type_name()
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml", "json"]
    }
}

/// Lookup source backed by a YAML settings file.
///
/// Top-level keys answer lookups directly; dotted keys are followed into nested
/// mappings.
///
/// # Priority
///
/// YAML files have a priority of 1, which means they are overridden by both
/// environment variables (priority 2) and command-line overrides (priority 3).
///
/// # Examples
///
/// ```rust,no_run
/// use cms_settings::adapters::YamlFileAdapter;
///
/// let adapter = YamlFileAdapter::from_file("/edx/etc/cms.yml").unwrap();
/// let adapter = YamlFileAdapter::from_default_location("cms", "org.openedx").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Parsed top-level values
    values: BTreeMap<String, ConfigValue>,
}

impl YamlFileAdapter {
    /// Reads and parses a YAML settings file.
    ///
    /// Fails with `LoadError` if the file is unreadable, too large or malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (file_path, content) = read_source(path.as_ref())?;
        let values = YamlParser::new()
            .parse(&content)
            .map_err(|e| ConfigError::load(file_path.display().to_string(), "malformed YAML", e))?;

        tracing::debug!(
            "Loaded {} settings from '{}'",
            values.len(),
            file_path.display()
        );

        Ok(Self { file_path, values })
    }

    /// Reads `config.yaml` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "cms")
    /// * `qualifier` - The organization/qualifier (e.g., "org.openedx")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Reads `filename` from the OS-appropriate configuration directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::LoadError {
                source_name: "yaml-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_file(proj_dirs.config_dir().join(filename))
    }

    /// Returns the path to the settings file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for YamlFileAdapter {
    fn name(&self) -> &str {
        "yaml-file"
    }

    fn priority(&self) -> u8 {
        FILE_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        if let Some(value) = self.values.get(key.as_str()) {
            return Ok(Some(value.clone()));
        }
        if !key.is_path() {
            return Ok(None);
        }
        Ok(self
            .values
            .get(key.root())
            .and_then(|root| root.get_path(key.segments().skip(1)))
            .cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
