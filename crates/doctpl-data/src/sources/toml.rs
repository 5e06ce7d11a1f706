//! TOML data source.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::sources::{require_file, DataSource};

/// TOML file data source
///
/// Tables become objects and arrays of tables become lists, so a TOML file
/// drives templates exactly like the equivalent JSON.
pub struct TomlSource {
    /// Path to the TOML file
    path: String,
}

impl TomlSource {
    /// Create a new TOML source from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: require_file(path.as_ref())?,
        })
    }
}

impl DataSource for TomlSource {
    fn load(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path)?;
        from_toml_str(&content)
    }

    fn format(&self) -> &'static str {
        "toml"
    }
}

/// Parse template data from a TOML string
pub fn from_toml_str(input: &str) -> Result<Value> {
    Ok(::toml::from_str(input)?)
}
