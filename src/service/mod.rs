// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: lookup precedence and layer resolution.

pub mod environment_resolver;
pub mod layer_resolver;
pub mod settings;

// Re-export commonly used types
pub use environment_resolver::{EnvironmentResolver, EnvironmentResolverBuilder};
pub use layer_resolver::{resolve_layers, LayerResolver};
pub use settings::{resolve_environment, SettingsBuilder};
