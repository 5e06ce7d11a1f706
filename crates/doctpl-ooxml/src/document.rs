//! Document model (word/document.xml)
//!
//! The tree mirrors the body of a WordprocessingML document: paragraphs,
//! runs ("records") and tables, each with its formatting params. Every node
//! owns its children, so `Clone` is a full deep copy.

use std::collections::BTreeMap;

use crate::values::{
    BorderSet, EmptyValue, GridColumn, HeightValue, IntValue, LookValue, MarginValue,
    RecordFonts, ReferenceValue, ShadowValue, SizeValue, SpacingValue, StringValue, StyleValue,
    WidthValue,
};

/// A parsed Word document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Namespace prefix to URI bindings declared on the root element
    pub scheme: BTreeMap<String, String>,
    /// Space separated prefixes listed in `mc:Ignorable` (empty if none)
    pub skip_scheme: String,
    /// Document body
    pub body: Body,
}

/// Document body: the item sequence plus section properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub items: Vec<DocItem>,
    pub params: BodyParams,
}

/// Section properties (`sectPr`)
///
/// Page size and margin are always written; the references and the bidi
/// flag only when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyParams {
    pub header_reference: Option<ReferenceValue>,
    pub footer_reference: Option<ReferenceValue>,
    pub page_size: SizeValue,
    pub page_margin: MarginValue,
    pub bidi: Option<IntValue>,
}

/// Kind of a [`DocItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocItemKind {
    Paragraph,
    Record,
    Table,
    Bookmark,
}

/// Block or inline element of the body
#[derive(Debug, Clone, PartialEq)]
pub enum DocItem {
    /// A paragraph (`w:p`)
    Paragraph(ParagraphItem),
    /// A text run (`w:r`)
    Record(RecordItem),
    /// A table (`w:tbl`)
    Table(TableItem),
    /// A bookmark anchor; declared only, the codec neither reads nor writes it
    Bookmark,
}

impl DocItem {
    /// Local element name
    pub fn tag(&self) -> &'static str {
        match self {
            DocItem::Paragraph(_) => "p",
            DocItem::Record(_) => "r",
            DocItem::Table(_) => "tbl",
            DocItem::Bookmark => "bookmarkStart",
        }
    }

    pub fn kind(&self) -> DocItemKind {
        match self {
            DocItem::Paragraph(_) => DocItemKind::Paragraph,
            DocItem::Record(_) => DocItemKind::Record,
            DocItem::Table(_) => DocItemKind::Table,
            DocItem::Bookmark => DocItemKind::Bookmark,
        }
    }

    /// Concatenated text of all descendant runs
    pub fn plain_text(&self) -> String {
        match self {
            DocItem::Paragraph(p) => p.plain_text(),
            DocItem::Record(r) => r.plain_text().to_string(),
            DocItem::Table(t) => t.plain_text(),
            DocItem::Bookmark => String::new(),
        }
    }

    /// Visit every run below (and including) this item
    pub fn for_each_record_mut(&mut self, f: &mut dyn FnMut(&mut RecordItem)) {
        match self {
            DocItem::Paragraph(p) => {
                for item in &mut p.items {
                    item.for_each_record_mut(f);
                }
            }
            DocItem::Record(r) => f(r),
            DocItem::Table(t) => {
                for cell in t.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                    for item in &mut cell.items {
                        item.for_each_record_mut(f);
                    }
                }
            }
            DocItem::Bookmark => {}
        }
    }

    pub fn as_record(&self) -> Option<&RecordItem> {
        match self {
            DocItem::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&ParagraphItem> {
        match self {
            DocItem::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableItem> {
        match self {
            DocItem::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<ParagraphItem> for DocItem {
    fn from(item: ParagraphItem) -> Self {
        DocItem::Paragraph(item)
    }
}

impl From<RecordItem> for DocItem {
    fn from(item: RecordItem) -> Self {
        DocItem::Record(item)
    }
}

impl From<TableItem> for DocItem {
    fn from(item: TableItem) -> Self {
        DocItem::Table(item)
    }
}

/// A paragraph with its params, children and revision ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphItem {
    pub params: ParagraphParams,
    /// Runs, and occasionally nested tables
    pub items: Vec<DocItem>,
    // Revision ids are opaque and written back verbatim
    pub rsid_r: String,
    pub rsid_r_default: String,
    pub rsid_p: String,
    pub rsid_r_pr: String,
}

impl ParagraphItem {
    /// Paragraph holding a single plain run
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            items: vec![DocItem::Record(RecordItem::with_text(text))],
            ..Default::default()
        }
    }

    pub fn plain_text(&self) -> String {
        self.items.iter().map(DocItem::plain_text).collect()
    }
}

/// Paragraph properties (`pPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphParams {
    pub style: Option<StringValue>,
    pub spacing: Option<SpacingValue>,
    pub justification: Option<StringValue>,
    pub bidi: Option<IntValue>,
    pub borders: Option<BorderSet>,
    pub widow_control: Option<IntValue>,
    pub indentation: Option<MarginValue>,
    /// Default run formatting of the paragraph mark
    pub run_params: Option<RecordParams>,
}

impl ParagraphParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A text run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordItem {
    pub params: Option<RecordParams>,
    pub text: Text,
    pub tab: bool,
    pub line_break: bool,
    pub drawing: Option<Drawing>,
}

impl RecordItem {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Text::new(text),
            ..Default::default()
        }
    }

    pub fn plain_text(&self) -> &str {
        &self.text.value
    }
}

/// Run text and its `xml:space` flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub space: Option<String>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            space: None,
        }
    }

    /// Text with `xml:space="preserve"`
    pub fn preserved(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            space: Some("preserve".to_string()),
        }
    }
}

/// Run properties (`rPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordParams {
    pub fonts: Option<RecordFonts>,
    pub rtl: Option<IntValue>,
    pub size: Option<IntValue>,
    pub size_cs: Option<IntValue>,
    pub lang: Option<StringValue>,
    pub underline: Option<ShadowValue>,
    pub italic: Option<EmptyValue>,
    pub bold: Option<EmptyValue>,
    pub bold_cs: Option<EmptyValue>,
    pub strike: Option<EmptyValue>,
    pub no_proof: Option<EmptyValue>,
    pub color: Option<StringValue>,
    pub highlight: Option<StyleValue>,
    pub vert_align: Option<StyleValue>,
}

/// Raw `w:drawing` markup, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drawing {
    pub xml: String,
}

/// A table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableItem {
    pub params: Option<TableParams>,
    pub grid: Option<Vec<GridColumn>>,
    pub rows: Vec<TableRow>,
}

impl TableItem {
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(TableCell::plain_text)
            .collect()
    }
}

/// Table properties (`tblPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableParams {
    pub style: Option<StringValue>,
    pub width: Option<WidthValue>,
    pub justification: Option<StringValue>,
    pub indentation: Option<WidthValue>,
    pub borders: Option<BorderSet>,
    pub look: Option<LookValue>,
}

/// A table row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub params: Option<RowParams>,
    pub cells: Vec<TableCell>,
}

/// Row properties (`trPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowParams {
    pub height: Option<HeightValue>,
    pub header: Option<EmptyValue>,
    pub cant_split: Option<EmptyValue>,
}

/// A table cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub params: CellParams,
    pub items: Vec<DocItem>,
}

impl TableCell {
    /// Cell holding one paragraph with a single run
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            params: CellParams::default(),
            items: vec![DocItem::Paragraph(ParagraphItem::with_text(text))],
        }
    }

    pub fn plain_text(&self) -> String {
        self.items.iter().map(DocItem::plain_text).collect()
    }
}

/// Cell properties (`tcPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellParams {
    pub width: Option<WidthValue>,
    pub grid_span: Option<IntValue>,
    pub vertical_merge: Option<VerticalMerge>,
    pub shading: Option<ShadowValue>,
    pub vertical_align: Option<StringValue>,
    pub borders: Option<BorderSet>,
}

impl CellParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Value of a present `vMerge` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// First cell of a merged group (`w:val="restart"`)
    Restart,
    /// Cell merged into the one above (no `w:val`)
    Continue,
}

impl Document {
    /// Plain text of the body, one top-level item per line
    pub fn plain_text(&self) -> String {
        self.body.plain_text()
    }
}

impl Body {
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(DocItem::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
