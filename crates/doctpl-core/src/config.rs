//! Render options
//!
//! Options can be given in code or read from a TOML file:
//!
//! ```toml
//! coalesce_runs = true
//! expand_tables = true
//! resolve_vertical_merge = true
//! flatten_root_context = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Switches for the individual rendering passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Merge runs that split a marker before substitution
    pub coalesce_runs: bool,
    /// Repeat table rows bound to a list
    pub expand_tables: bool,
    /// Turn `[v-merge]` cells into vertically merged cells
    pub resolve_vertical_merge: bool,
    /// Outside bound rows, look up markers in the flattened root data
    /// (`Customer_Name`) rather than the data as given
    pub flatten_root_context: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            coalesce_runs: true,
            expand_tables: true,
            resolve_vertical_merge: true,
            flatten_root_context: true,
        }
    }
}

impl RenderOptions {
    /// Parse options from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }
}
