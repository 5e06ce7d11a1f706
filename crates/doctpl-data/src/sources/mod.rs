//! Data source implementations.
//!
//! This module contains loaders for the file formats template data can be
//! written in (JSON, TOML).

pub mod json;
pub mod toml;

pub use self::json::JsonSource;
pub use self::toml::TomlSource;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{DataError, Result};

/// Trait for sources that produce one template data value
pub trait DataSource {
    /// Read and parse the whole source
    fn load(&self) -> Result<Value>;

    /// Short format name for diagnostics
    fn format(&self) -> &'static str;
}

/// Data file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DataFormat::Json),
            Some("toml") => Ok(DataFormat::Toml),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open a data source for `path`, picking the loader from its extension
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn DataSource>> {
    let path = path.as_ref();
    let source: Box<dyn DataSource> = match DataFormat::from_path(path)? {
        DataFormat::Json => Box::new(JsonSource::new(path)?),
        DataFormat::Toml => Box::new(TomlSource::new(path)?),
    };
    debug!(path = %path.display(), format = source.format(), "opened data source");
    Ok(source)
}

/// Load template data from a `.json` or `.toml` file
pub fn load_file(path: impl AsRef<Path>) -> Result<Value> {
    open(path)?.load()
}

/// Fail with `FileNotFound` unless `path` exists
pub(crate) fn require_file(path: &Path) -> Result<String> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(DataError::FileNotFound(path_str));
    }
    Ok(path_str)
}
