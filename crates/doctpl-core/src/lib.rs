//! doctpl-core - Fill Word templates with data
//!
//! Renders `{{Marker}}` templates inside a DOCX body: runs that Word split
//! apart are coalesced, markers are substituted through an [`Evaluator`],
//! table rows bound to a list are repeated per element and `[v-merge]`
//! cells become vertically merged cells.
//!
//! # Example
//!
//! ```
//! use doctpl_core::render_document;
//! use doctpl_ooxml::{DocItem, Document, ParagraphItem, RecordItem};
//! use serde_json::json;
//!
//! let mut doc = Document::default();
//! doc.body.items.push(DocItem::Paragraph(ParagraphItem {
//!     items: vec![
//!         DocItem::Record(RecordItem::with_text("Dear {{Customer.")),
//!         DocItem::Record(RecordItem::with_text("Name}},")),
//!     ],
//!     ..Default::default()
//! }));
//!
//! render_document(&mut doc, &json!({"Customer": {"Name": "ACME"}})).unwrap();
//! assert_eq!(doc.plain_text(), "Dear ACME,");
//! ```

pub mod coalesce;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod markers;
pub mod merge;
pub mod render;
pub mod table;

pub use coalesce::coalesce_runs;
pub use config::RenderOptions;
pub use error::{RenderError, Result};
pub use evaluator::{Evaluator, MarkerEvaluator};
pub use merge::resolve_vertical_merge;
pub use render::{render_document, render_template, Renderer};
pub use table::list_rows;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
