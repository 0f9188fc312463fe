// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing lookup sources and layer file parsers.
//!
//! Lookup sources implement the `ConfigSource` port; parsers implement
//! `ConfigParser` and are driven by the [`LayerFileLoader`].

#[cfg(feature = "cli")]
pub mod cli;
pub mod env_file;
#[cfg(feature = "env")]
pub mod env_var;
pub mod layer_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineAdapter;
pub use env_file::EnvFileParser;
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
pub use layer_file::{load_layer, LayerFileLoader};
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileAdapter, YamlParser};
