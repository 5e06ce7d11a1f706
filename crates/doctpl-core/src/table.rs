//! Table row expansion.
//!
//! A row binds to a list when the first non-length marker of one of its
//! cells walks into a list in the data (`{{Items.Name}}` with `Items` a list). The row
//! is then repeated once per flattened row of that list and each copy is
//! rendered against its own flat row. Rows bound to an empty list are
//! removed.

use doctpl_data::{flatten_rows_along, resolve_list_binding, FlatMap, Value};
use doctpl_ooxml::{TableItem, TableRow};
use tracing::debug;

use crate::error::Result;
use crate::markers::markers;
use crate::render::{Renderer, Scope};

/// Flattened data rows for a table row bound to a list
///
/// Cells are tried in order; the first cell whose first non-length marker
/// resolves to a list decides the binding. Length markers only count a list
/// and are skipped. `None` means the row is not bound.
pub fn list_rows(row: &TableRow, data: &Value) -> Option<Vec<FlatMap>> {
    row.cells.iter().find_map(|cell| {
        let text = cell.plain_text();
        let marker = markers(&text).find(|m| !m.length)?;
        let binding = resolve_list_binding(data, marker.identifier)?;
        Some(flatten_rows_along(
            binding.value,
            &binding.key_prefix(),
            &binding.path,
        ))
    })
}

impl Renderer<'_> {
    /// Expand bound rows and render every row of `table`
    pub(crate) fn render_table(&self, table: &mut TableItem, scope: Scope<'_>) -> Result<()> {
        let mut index = 0;

        while index < table.rows.len() {
            let lines = if self.options().expand_tables {
                list_rows(&table.rows[index], scope.data)
            } else {
                None
            };

            let Some(lines) = lines else {
                self.render_row(&mut table.rows[index], scope)?;
                index += 1;
                continue;
            };

            if lines.is_empty() {
                debug!(row = index, "Removing row bound to an empty list");
                table.rows.remove(index);
                continue;
            }

            debug!(row = index, count = lines.len(), "Expanding table row");
            let template = table.rows[index].clone();
            for (n, line) in lines.into_iter().enumerate() {
                if n > 0 {
                    table.rows.insert(index, template.clone());
                }
                let line = Value::Object(line);
                let row_scope = Scope {
                    data: &line,
                    lookup: &line,
                };
                self.render_row(&mut table.rows[index], row_scope)?;
                index += 1;
            }
        }

        Ok(())
    }
}
