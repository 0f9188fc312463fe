// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for settings resolution.
//!
//! Loading a layer is the only fallible step of resolution: an unreadable or malformed
//! layer source is a [`ConfigError::LoadError`] and aborts start-up. Lookups of absent
//! keys are not errors; callers supply defaults. The remaining variants come from the
//! typed accessors and from explicit `require` calls.

use crate::domain::ConfigValue;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for settings operations.
///
/// # Examples
///
/// ```
/// use cms_settings::domain::ConfigError;
///
/// fn load() -> Result<(), ConfigError> {
///     Err(ConfigError::LoadError {
///         source_name: "staging.yaml".to_string(),
///         message: "document root is not a mapping".to_string(),
///         source: None,
///     })
/// }
/// assert!(load().unwrap_err().to_string().contains("staging.yaml"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A layer source could not be read or parsed.
    #[error("Failed to load settings layer '{source_name}': {message}")]
    LoadError {
        /// The file or source that failed
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse layer content.
    #[error("Failed to parse settings: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A key that the caller required is absent from every layer and source.
    #[error("Settings key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// The value has a different shape than the caller asked for.
    #[error("Settings value for key '{key}' is a {found}, expected {expected}")]
    TypeMismatch {
        /// The key being read
        key: String,
        /// The requested type
        expected: String,
        /// The actual kind of value
        found: &'static str,
    },

    /// Failed to convert a string value to the requested type.
    #[error("Failed to convert settings value for key '{key}' to type {target_type}: {source}")]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An environment name that has no built-in profile.
    #[error("Unknown environment '{name}' (expected one of: build, production, development, staging)")]
    UnknownEnvironment {
        /// The name that was given
        name: String,
    },
}

impl ConfigError {
    /// Creates a `LoadError` for `source_name` wrapping an underlying error.
    pub fn load<E>(source_name: impl Into<String>, message: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::LoadError {
            source_name: source_name.into(),
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Creates a `TypeMismatch` for a value of the wrong shape.
    pub fn type_mismatch(key: &str, expected: &str, found: &ConfigValue) -> Self {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.type_name(),
        }
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` for errors that come from loading a layer source.
    pub fn is_load_error(&self) -> bool {
        matches!(self, ConfigError::LoadError { .. })
    }
}

/// A specialized Result type for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
