// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the settings model.
//!
//! Keys, values, layers, the resolved configuration and the built-in environment
//! profiles. Nothing in here performs I/O.

pub mod config_key;
pub mod config_layer;
pub mod config_value;
pub mod configuration_source;
pub mod environment;
pub mod errors;
pub mod resolved;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_layer::{ConfigLayer, PatchMode, PathPatch};
pub use config_value::ConfigValue;
pub use configuration_source::ConfigurationSource;
pub use environment::Environment;
pub use errors::{ConfigError, Result};
pub use resolved::ResolvedConfiguration;
