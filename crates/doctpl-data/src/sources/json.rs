//! JSON data source.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::sources::{require_file, DataSource};

/// JSON file data source
pub struct JsonSource {
    /// Path to the JSON file
    path: String,
}

impl JsonSource {
    /// Create a new JSON source from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: require_file(path.as_ref())?,
        })
    }
}

impl DataSource for JsonSource {
    fn load(&self) -> Result<Value> {
        let file = File::open(&self.path)?;
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(value)
    }

    fn format(&self) -> &'static str {
        "json"
    }
}

/// Parse template data from a JSON string
pub fn from_json_str(input: &str) -> Result<Value> {
    Ok(serde_json::from_str(input)?)
}
