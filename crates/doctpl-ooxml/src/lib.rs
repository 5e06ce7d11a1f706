//! # doctpl-ooxml
//!
//! WordprocessingML document model and structural codec for doctpl.
//!
//! This crate provides functionality to:
//! - Open and re-pack DOCX/DOTX files
//! - Decode `word/document.xml` into a typed tree of paragraphs, runs and tables
//! - Encode the tree back into `word/document.xml`
//!
//! Only the elements the model knows survive a round trip; everything else is
//! dropped on decode.
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use doctpl_ooxml::{DocItem, Template};
//!
//! let template = Template::load("document.docx")?;
//! let document = template.document()?;
//!
//! for item in &document.body.items {
//!     if let DocItem::Paragraph(p) = item {
//!         println!("{}", p.plain_text());
//!     }
//! }
//! # Ok::<(), doctpl_ooxml::OoxmlError>(())
//! ```

pub mod document;
pub mod error;
mod reader;
pub mod template;
pub mod values;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use document::{
    Body, BodyParams, CellParams, DocItem, DocItemKind, Document, Drawing, ParagraphItem,
    ParagraphParams, RecordItem, RecordParams, RowParams, TableCell, TableItem, TableParams,
    TableRow, Text, VerticalMerge,
};
pub use error::{OoxmlError, Result};
pub use template::{Template, DOCUMENT_PART};
pub use values::ElementValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
