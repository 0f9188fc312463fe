// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are implemented by adapters in the adapters layer.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::{ConfigSource, CLI_PRIORITY, ENV_PRIORITY, FILE_PRIORITY};
