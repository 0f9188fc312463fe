// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading override layers from files.
//!
//! The parser is picked by file extension. Every failure (missing file, oversized
//! file, unknown extension, malformed content) is reported as
//! [`ConfigError::LoadError`] so that start-up can abort on it.

use crate::adapters::EnvFileParser;
use crate::domain::{ConfigError, ConfigLayer, Result};
use crate::ports::ConfigParser;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for a layer or settings file (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_LAYER_FILE_SIZE: u64 = 10 * 1024 * 1024;

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Reads a settings source from disk, returning its canonical path and content.
pub(crate) fn read_source(path: &Path) -> Result<(PathBuf, String)> {
    // Canonicalize path to prevent directory traversal attacks
    let canonical_path = path.canonicalize().map_err(|e| {
        ConfigError::load(display_name(path), "invalid or inaccessible path", e)
    })?;

    // Check file size before reading to prevent DoS via large files
    let metadata = fs::metadata(&canonical_path).map_err(|e| {
        ConfigError::load(display_name(&canonical_path), "failed to read file metadata", e)
    })?;

    if metadata.len() > MAX_LAYER_FILE_SIZE {
        return Err(ConfigError::LoadError {
            source_name: display_name(&canonical_path),
            message: format!(
                "file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_LAYER_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(&canonical_path).map_err(|e| {
        ConfigError::load(display_name(&canonical_path), "failed to read file", e)
    })?;

    Ok((canonical_path, content))
}

/// Loads [`ConfigLayer`]s from files.
///
/// By default it understands `.yaml`/`.yml`/`.json` (with the `yaml` feature) and
/// `.env` files. The layer is named after the file stem, so `staging.yaml` yields a
/// layer called `staging`.
///
/// # Examples
///
/// ```rust,no_run
/// use cms_settings::adapters::LayerFileLoader;
///
/// # fn main() -> cms_settings::domain::Result<()> {
/// let layer = LayerFileLoader::new().load("/edx/etc/cms/staging.yaml")?;
/// assert_eq!(layer.name(), "staging");
/// # Ok(())
/// # }
/// ```
pub struct LayerFileLoader {
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl LayerFileLoader {
    /// Creates a loader with the built-in parsers.
    pub fn new() -> Self {
        let mut parsers: Vec<Box<dyn ConfigParser>> = Vec::new();
        #[cfg(feature = "yaml")]
        parsers.push(Box::new(crate::adapters::YamlParser::new()));
        parsers.push(Box::new(EnvFileParser::new()));
        Self { parsers }
    }

    /// Registers an additional parser. Later parsers take precedence for extensions
    /// that are already handled.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.insert(0, parser);
        self
    }

    /// Reads and parses the layer file at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ConfigLayer> {
        let path = path.as_ref();
        let parser = self.parser_for(path)?;
        let (canonical_path, content) = read_source(path)?;
        let name = canonical_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("layer")
            .to_string();

        let layer = Self::parse_with(parser, &name, &display_name(&canonical_path), &content)?;

        tracing::debug!(
            "Loaded layer '{}' from '{}' ({} keys, {} patches)",
            layer.name(),
            canonical_path.display(),
            layer.len(),
            layer.patches().len()
        );

        Ok(layer)
    }

    /// Parses in-memory layer content. `file_name` selects the parser by extension.
    pub fn load_str(&self, name: &str, file_name: &str, content: &str) -> Result<ConfigLayer> {
        let parser = self.parser_for(Path::new(file_name))?;
        Self::parse_with(parser, name, file_name, content)
    }

    fn parse_with(
        parser: &dyn ConfigParser,
        name: &str,
        source_name: &str,
        content: &str,
    ) -> Result<ConfigLayer> {
        let pairs = parser
            .parse(content)
            .map_err(|e| ConfigError::load(source_name, "malformed layer file", e))?;
        Ok(ConfigLayer::from_pairs(name, pairs))
    }

    fn parser_for(&self, path: &Path) -> Result<&dyn ConfigParser> {
        let file_name = display_name(path);
        self.parsers
            .iter()
            .find(|p| p.supports(&file_name))
            .map(|p| p.as_ref())
            .ok_or_else(|| ConfigError::LoadError {
                source_name: file_name.clone(),
                message: "unsupported file extension".to_string(),
                source: None,
            })
    }
}

impl Default for LayerFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads one layer file with the built-in parsers.
///
/// Shorthand for `LayerFileLoader::new().load(path)`.
pub fn load_layer<P: AsRef<Path>>(path: P) -> Result<ConfigLayer> {
    LayerFileLoader::new().load(path)
}
