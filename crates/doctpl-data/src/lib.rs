//! # doctpl-data
//!
//! Template data for doctpl - load the data a document is rendered with and
//! reshape it into the flat key/value maps template markers address.
//!
//! ## Features
//!
//! - **Sources**: read `.json` and `.toml` files into one dynamic [`Value`]
//! - **Serde bridge**: convert any `Serialize` type with [`to_value`]
//! - **Path resolution**: find the list a dotted marker path runs through
//! - **Flattening**: expand nested data into rows (`Items_Name`, `Items_length`)
//!
//! ## Example
//!
//! ```rust
//! use doctpl_data::{flatten_rows, from_json_str};
//!
//! let data = from_json_str(r#"{"Items": [{"Name": "Bolt"}, {"Name": "Nut"}]}"#)?;
//! let rows = flatten_rows(&data);
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1]["Items_Name"], "Nut");
//! assert_eq!(rows[1]["Items_length"], 2);
//! # Ok::<(), doctpl_data::DataError>(())
//! ```

pub mod error;
pub mod flatten;
pub mod path;
pub mod sources;

use serde::Serialize;

// Re-exports
pub use error::{DataError, Result};
pub use flatten::{flatten_fields, flatten_rows, flatten_rows_along, join_key, FlatMap};
pub use path::{resolve_list_binding, ListBinding};
pub use serde_json::{Map, Value};
pub use sources::json::from_json_str;
pub use sources::toml::from_toml_str;
pub use sources::{load_file, DataFormat, DataSource, JsonSource, TomlSource};

/// Convert any serializable data into a template [`Value`]
pub fn to_value<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    Ok(serde_json::to_value(data)?)
}
