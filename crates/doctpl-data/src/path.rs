//! Dotted path resolution against template data.

use serde_json::Value;

/// A list found while walking a dotted path
#[derive(Debug, Clone, PartialEq)]
pub struct ListBinding<'a> {
    /// Value the rows are flattened from: the parent of the list, or the
    /// root when the list is a top-level field
    pub value: &'a Value,
    /// Segments walked to reach `value`
    pub prefix: Vec<&'a str>,
    /// Remaining segments from `value`, starting with the list field
    pub path: Vec<&'a str>,
}

impl ListBinding<'_> {
    /// Key prefix of flattened fields (`Order.Items` bound at `Order` → `Order`)
    pub fn key_prefix(&self) -> String {
        self.prefix.join("_")
    }
}

/// Look up a field by name; only objects have fields
pub fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(name),
        _ => None,
    }
}

/// Walk `path` (segments separated by `.`) from `root` and report the first
/// list on the way
///
/// Returns `None` when a segment does not resolve or the walk ends without
/// meeting a list.
pub fn resolve_list_binding<'a>(root: &'a Value, path: &'a str) -> Option<ListBinding<'a>> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;

    for (index, name) in segments.iter().enumerate() {
        let next = field(current, name)?;
        if next.is_array() {
            return Some(ListBinding {
                value: current,
                prefix: segments[..index].to_vec(),
                path: segments[index..].to_vec(),
            });
        }
        current = next;
    }
    None
}
