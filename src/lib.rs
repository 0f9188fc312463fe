// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered environment settings for a content-management service.
//!
//! Settings are assembled at start-up from an ordered chain of layers: shared base
//! settings, a production profile, and a development or staging overlay on top. Each
//! layer overrides the keys it names; everything else is inherited. A handful of
//! per-deployment toggles are read from the process environment, a settings file or
//! the command line, falling back to hardcoded defaults.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ConfigLayer`,
//!   `ResolvedConfiguration`, `Environment`, errors)
//! - **Ports**: Trait definitions for lookup sources and layer file parsers
//! - **Adapters**: Environment variables, YAML/`.env` files, command-line overrides
//! - **Service**: Lookup precedence and layer resolution
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML layer files and settings files (default)
//! - `env`: Enable environment variable lookup (default)
//! - `cli`: Enable command-line overrides and the `cms-settings` binary (default)
//!
//! # Quick Start
//!
//! ```rust
//! use cms_settings::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let lookup = EnvironmentResolver::new();
//! let settings = SettingsBuilder::new(Environment::Development)
//!     .with_base_layer(ConfigLayer::new("common").with_value("DEBUG", false))
//!     .build(&lookup)?;
//!
//! assert_eq!(settings.get(&ConfigKey::from("DEBUG")), Some(&ConfigValue::Bool(true)));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigLayer, ConfigValue, ConfigurationSource, Environment,
        PatchMode, PathPatch, ResolvedConfiguration, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, CLI_PRIORITY, ENV_PRIORITY, FILE_PRIORITY};
    pub use crate::service::{
        resolve_layers, EnvironmentResolver, EnvironmentResolverBuilder, LayerResolver,
        SettingsBuilder,
    };

    pub use crate::adapters::{load_layer, EnvFileParser, LayerFileLoader};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineAdapter;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
