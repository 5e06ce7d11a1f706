//! Flattening of nested data into flat key → value maps.
//!
//! Keys are built by joining field names with `_`, which is how template
//! markers spell nested paths once `.` has been rewritten. Every list
//! contributes a `<key>_length` field.
//!
//! Row flattening is a join: the fields of an object combine as a cartesian
//! product of their rows, a list contributes one row set per element, and an
//! empty list contributes no rows at all.

use serde_json::{Map, Value};

/// One flattened row
pub type FlatMap = Map<String, Value>;

/// Join a key prefix and a field name
pub fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

/// Which lists are expanded into rows
#[derive(Clone, Copy)]
enum Expand<'p> {
    /// Every list
    All,
    /// Only lists reached by following these segments
    Along(&'p [&'p str]),
    /// No list; lists only report their length
    Nothing,
}

impl<'p> Expand<'p> {
    fn child(self, name: &str) -> Expand<'p> {
        match self {
            Expand::All => Expand::All,
            Expand::Along(path) => match path.split_first() {
                Some((first, rest)) if *first == name => Expand::Along(rest),
                _ => Expand::Nothing,
            },
            Expand::Nothing => Expand::Nothing,
        }
    }
}

/// Flatten `value` into rows, expanding every list it contains
pub fn flatten_rows(value: &Value) -> Vec<FlatMap> {
    rows(value, "", Expand::All)
}

/// Flatten `value` into rows, expanding only the lists on `path`
///
/// Lists elsewhere in `value` contribute their `_length` field and nothing
/// else, so unrelated lists never multiply the rows. Keys start with
/// `prefix`.
pub fn flatten_rows_along(value: &Value, prefix: &str, path: &[&str]) -> Vec<FlatMap> {
    rows(value, prefix, Expand::Along(path))
}

/// Flatten `value` into one map: nested objects are joined into keys and
/// lists contribute only their `_length`
pub fn flatten_fields(value: &Value) -> FlatMap {
    rows(value, "", Expand::Nothing)
        .into_iter()
        .next()
        .unwrap_or_default()
}

fn rows(value: &Value, prefix: &str, expand: Expand<'_>) -> Vec<FlatMap> {
    match value {
        Value::Object(map) => {
            let mut acc = vec![FlatMap::new()];
            for (name, child) in map {
                let key = join_key(prefix, name);
                let child_rows = rows(child, &key, expand.child(name));
                acc = product(acc, child_rows);
            }
            acc
        }
        Value::Array(items) => {
            let length_key = join_key(prefix, "length");
            let length = Value::from(items.len());
            if matches!(expand, Expand::Nothing) {
                let mut row = FlatMap::new();
                row.insert(length_key, length);
                return vec![row];
            }

            let mut out = Vec::new();
            for item in items {
                for mut row in rows(item, prefix, expand) {
                    row.insert(length_key.clone(), length.clone());
                    out.push(row);
                }
            }
            out
        }
        scalar => {
            let mut row = FlatMap::new();
            if !prefix.is_empty() {
                row.insert(prefix.to_string(), scalar.clone());
            }
            vec![row]
        }
    }
}

/// Every combination of one row from `left` and one from `right`
fn product(left: Vec<FlatMap>, right: Vec<FlatMap>) -> Vec<FlatMap> {
    if right.len() == 1 {
        // Common case: a scalar or an unexpanded field
        let extra = &right[0];
        return left
            .into_iter()
            .map(|mut row| {
                row.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                row
            })
            .collect();
    }

    let mut out = Vec::with_capacity(left.len() * right.len());
    for l in &left {
        for r in &right {
            let mut row = l.clone();
            row.extend(r.iter().map(|(k, v)| (k.clone(), v.clone())));
            out.push(row);
        }
    }
    out
}
