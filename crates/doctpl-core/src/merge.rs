//! Vertical merge resolution.
//!
//! A cell whose text carries `[v-merge]` is merged with the cell above it
//! when both show the same text. Rows are visited bottom-up so each cell
//! is compared with the still unprocessed cell above.

use doctpl_ooxml::{DocItem, TableItem, VerticalMerge};
use tracing::debug;

use crate::markers::{has_merge_marker, strip_merge_markers};

/// Mark `[v-merge]` cells as merge restarts or continuations
///
/// A cell continues the merge when the cell with the same index in the row
/// above has equal plain text; its content is cleared. Otherwise the cell
/// restarts a merge and loses its merge markers. Cells without items are
/// never touched.
pub fn resolve_vertical_merge(table: &mut TableItem) {
    for row_index in (0..table.rows.len()).rev() {
        for cell_index in 0..table.rows[row_index].cells.len() {
            let cell = &table.rows[row_index].cells[cell_index];
            if cell.items.is_empty() {
                continue;
            }
            let text = cell.plain_text();
            if !has_merge_marker(&text) {
                continue;
            }

            let continues = row_index > 0
                && table.rows[row_index - 1]
                    .cells
                    .get(cell_index)
                    .is_some_and(|above| above.plain_text() == text);

            let cell = &mut table.rows[row_index].cells[cell_index];
            if continues {
                debug!(row = row_index, cell = cell_index, "Continuing vertical merge");
                cell.params.vertical_merge = Some(VerticalMerge::Continue);
                cell.items.clear();
            } else {
                debug!(row = row_index, cell = cell_index, "Starting vertical merge");
                cell.params.vertical_merge = Some(VerticalMerge::Restart);
                for item in &mut cell.items {
                    strip_item(item);
                }
            }
        }
    }
}

fn strip_item(item: &mut DocItem) {
    item.for_each_record_mut(&mut |record| {
        if record.text.value.contains('[') {
            record.text.value = strip_merge_markers(&record.text.value);
        }
    });
}
