//! Run coalescing.
//!
//! Word splits text into runs wherever formatting, spell checking or edit
//! history changes, so a marker typed as `{{Customer.Name}}` often arrives
//! as `{{`, `Customer`, `.Name}}`. Coalescing folds the runs of an open
//! marker into the run that opened it.

use doctpl_ooxml::DocItem;

const OPENER: &str = "{{";
const CLOSER: &str = "}}";

/// Merge runs so that no marker spans more than one run
///
/// A run whose text contains `{{` absorbs the text of the runs that follow
/// it until the merged text contains `}}`; absorbed runs are dropped along
/// with their formatting. The closer test covers the whole merged text, so
/// a run that already holds a complete marker takes exactly one neighbour.
/// Any item that is not a run ends the merge. An opener that is never
/// closed keeps everything up to the end of the sequence.
pub fn coalesce_runs(items: Vec<DocItem>) -> Vec<DocItem> {
    let mut out: Vec<DocItem> = Vec::with_capacity(items.len());
    let mut open: Option<usize> = None;

    for item in items {
        match item {
            DocItem::Record(record) => {
                if let Some(index) = open {
                    if let Some(DocItem::Record(target)) = out.get_mut(index) {
                        target.text.value.push_str(&record.text.value);
                        if target.text.value.contains(CLOSER) {
                            open = None;
                        }
                        continue;
                    }
                }

                let opens = record.text.value.contains(OPENER);
                out.push(DocItem::Record(record));
                if opens {
                    open = Some(out.len() - 1);
                }
            }
            other => {
                open = None;
                out.push(other);
            }
        }
    }

    out
}
