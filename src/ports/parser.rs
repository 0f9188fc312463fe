// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layer file parser trait definition.
//!
//! A `ConfigParser` turns the text of a layer file into top-level name/value pairs.
//! Unlike a flattening parser, nested structures stay nested: a YAML document
//!
//! ```yaml
//! DATABASES:
//!   default:
//!     ENGINE: django.db.backends.mysql
//! ```
//!
//! yields one pair, `DATABASES`, whose value is a mapping.

use crate::domain::{ConfigValue, Result};
use std::collections::BTreeMap;

/// A trait for parsing layer files.
///
/// # Examples
///
/// ```rust
/// use cms_settings::ports::ConfigParser;
/// use cms_settings::domain::{ConfigValue, Result};
/// use std::collections::BTreeMap;
///
/// struct OnePair;
///
/// impl ConfigParser for OnePair {
///     fn parse(&self, content: &str) -> Result<BTreeMap<String, ConfigValue>> {
///         let mut map = BTreeMap::new();
///         map.insert("CONTENT".to_string(), ConfigValue::from(content));
///         Ok(map)
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["one"]
///     }
/// }
///
/// assert!(OnePair.supports("settings.one"));
/// assert!(!OnePair.supports("settings.yaml"));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses file content into top-level name/value pairs.
    ///
    /// Fails with `ParseError` when the content is malformed.
    fn parse(&self, content: &str) -> Result<BTreeMap<String, ConfigValue>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if the extension of `file_name` is one this parser handles.
    /// The comparison is case-insensitive.
    fn supports(&self, file_name: &str) -> bool {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestParser;

    impl ConfigParser for TestParser {
        fn parse(&self, _content: &str) -> Result<BTreeMap<String, ConfigValue>> {
            let mut map = BTreeMap::new();
            map.insert("STATIC_URL".to_string(), ConfigValue::from("/static/"));
            Ok(map)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let result = TestParser.parse("dummy content").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("STATIC_URL"), Some(&ConfigValue::from("/static/")));
    }

    #[test]
    fn test_supports_by_extension() {
        assert!(TestParser.supports("layer.test"));
        assert!(TestParser.supports("/etc/cms/layer.TST"));
        assert!(!TestParser.supports("layer.yaml"));
        assert!(!TestParser.supports("no_extension"));
    }
}
