//! Encoder for word/document.xml
//!
//! Output always uses the `w:` prefix. Child elements are written in the
//! order the WordprocessingML schema expects, which is not necessarily the
//! order they had in the source.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{
    Body, BodyParams, CellParams, DocItem, Document, ParagraphItem, ParagraphParams, RecordItem,
    RecordParams, RowParams, TableCell, TableItem, TableParams, TableRow, VerticalMerge,
};
use crate::error::{OoxmlError, Result};
use crate::values::{BorderSet, ElementValue};

/// WordprocessingML main namespace
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace
pub const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

struct DocumentWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> DocumentWriter<W> {
    fn new(out: W) -> Self {
        Self {
            writer: Writer::new(out),
        }
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for attr in attrs {
            element.push_attribute(*attr);
        }
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::Empty(BytesStart::new(name)))?;
        Ok(())
    }

    /// Write a property element as an empty tag carrying the value's attributes
    fn value<T: ElementValue>(&mut self, name: &str, value: &T) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, val) in value.attributes() {
            element.push_attribute((key, val.as_str()));
        }
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn opt_value<T: ElementValue>(&mut self, name: &str, value: &Option<T>) -> Result<()> {
        match value {
            Some(v) => self.value(name, v),
            None => Ok(()),
        }
    }

    fn document(&mut self, document: &Document) -> Result<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;

        let mut root = BytesStart::new("w:document");
        for (prefix, uri) in &document.scheme {
            if prefix.is_empty() {
                root.push_attribute(("xmlns", uri.as_str()));
            } else {
                root.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
            }
        }
        // Output elements and references need these two bound
        if !document.scheme.contains_key("w") {
            root.push_attribute(("xmlns:w", WORDML_NS));
        }
        if !document.scheme.contains_key("r") {
            root.push_attribute(("xmlns:r", RELATIONSHIPS_NS));
        }
        if !document.skip_scheme.is_empty() {
            root.push_attribute(("mc:Ignorable", document.skip_scheme.as_str()));
        }
        self.writer.write_event(Event::Start(root))?;

        self.body(&document.body)?;
        self.end("w:document")
    }

    fn body(&mut self, body: &Body) -> Result<()> {
        self.start("w:body", &[])?;
        for item in &body.items {
            self.item(item)?;
        }
        self.body_params(&body.params)?;
        self.end("w:body")
    }

    fn body_params(&mut self, params: &BodyParams) -> Result<()> {
        self.start("w:sectPr", &[])?;
        self.opt_value("w:headerReference", &params.header_reference)?;
        self.opt_value("w:footerReference", &params.footer_reference)?;
        self.value("w:pgSz", &params.page_size)?;
        self.value("w:pgMar", &params.page_margin)?;
        self.opt_value("w:bidi", &params.bidi)?;
        self.end("w:sectPr")
    }

    fn item(&mut self, item: &DocItem) -> Result<()> {
        match item {
            DocItem::Paragraph(p) => self.paragraph(p),
            DocItem::Record(r) => self.record(r),
            DocItem::Table(t) => self.table(t),
            DocItem::Bookmark => Err(OoxmlError::Unsupported(
                "bookmark items cannot be encoded".to_string(),
            )),
        }
    }

    fn paragraph(&mut self, paragraph: &ParagraphItem) -> Result<()> {
        self.start(
            "w:p",
            &[
                ("w:rsidR", paragraph.rsid_r.as_str()),
                ("w:rsidRDefault", paragraph.rsid_r_default.as_str()),
                ("w:rsidP", paragraph.rsid_p.as_str()),
                ("w:rsidRPr", paragraph.rsid_r_pr.as_str()),
            ],
        )?;
        if !paragraph.params.is_empty() {
            self.paragraph_params(&paragraph.params)?;
        }
        for item in &paragraph.items {
            self.item(item)?;
        }
        self.end("w:p")
    }

    fn paragraph_params(&mut self, params: &ParagraphParams) -> Result<()> {
        self.start("w:pPr", &[])?;
        self.opt_value("w:pStyle", &params.style)?;
        self.opt_value("w:widowControl", &params.widow_control)?;
        if let Some(borders) = &params.borders {
            self.borders("w:pBdr", borders)?;
        }
        self.opt_value("w:bidi", &params.bidi)?;
        self.opt_value("w:spacing", &params.spacing)?;
        self.opt_value("w:ind", &params.indentation)?;
        self.opt_value("w:jc", &params.justification)?;
        if let Some(run_params) = &params.run_params {
            self.record_params(run_params)?;
        }
        self.end("w:pPr")
    }

    fn borders(&mut self, name: &str, borders: &BorderSet) -> Result<()> {
        self.start(name, &[])?;
        for edge in BorderSet::EDGES {
            if let Some(value) = borders.edge(edge) {
                self.value(&format!("w:{edge}"), value)?;
            }
        }
        self.end(name)
    }

    fn record(&mut self, record: &RecordItem) -> Result<()> {
        self.start("w:r", &[])?;
        if let Some(params) = &record.params {
            self.record_params(params)?;
        }

        match &record.text.space {
            Some(space) => self.start("w:t", &[("xml:space", space.as_str())])?,
            None => self.start("w:t", &[])?,
        }
        self.writer
            .write_event(Event::Text(BytesText::new(&record.text.value)))?;
        self.end("w:t")?;

        if let Some(drawing) = &record.drawing {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(drawing.xml.as_str())))?;
        }
        if record.line_break {
            self.empty("w:br")?;
        }
        if record.tab {
            self.empty("w:tab")?;
        }
        self.end("w:r")
    }

    fn record_params(&mut self, params: &RecordParams) -> Result<()> {
        self.start("w:rPr", &[])?;
        self.opt_value("w:rFonts", &params.fonts)?;
        self.opt_value("w:b", &params.bold)?;
        self.opt_value("w:bCs", &params.bold_cs)?;
        self.opt_value("w:i", &params.italic)?;
        self.opt_value("w:strike", &params.strike)?;
        self.opt_value("w:noProof", &params.no_proof)?;
        self.opt_value("w:color", &params.color)?;
        self.opt_value("w:sz", &params.size)?;
        self.opt_value("w:szCs", &params.size_cs)?;
        self.opt_value("w:highlight", &params.highlight)?;
        self.opt_value("w:u", &params.underline)?;
        self.opt_value("w:vertAlign", &params.vert_align)?;
        self.opt_value("w:rtl", &params.rtl)?;
        self.opt_value("w:lang", &params.lang)?;
        self.end("w:rPr")
    }

    fn table(&mut self, table: &TableItem) -> Result<()> {
        self.start("w:tbl", &[])?;
        if let Some(params) = &table.params {
            self.table_params(params)?;
        }
        if let Some(grid) = &table.grid {
            self.start("w:tblGrid", &[])?;
            for column in grid {
                self.value("w:gridCol", column)?;
            }
            self.end("w:tblGrid")?;
        }
        for row in &table.rows {
            self.row(row)?;
        }
        self.end("w:tbl")
    }

    fn table_params(&mut self, params: &TableParams) -> Result<()> {
        self.start("w:tblPr", &[])?;
        self.opt_value("w:tblStyle", &params.style)?;
        self.opt_value("w:tblW", &params.width)?;
        self.opt_value("w:jc", &params.justification)?;
        self.opt_value("w:tblInd", &params.indentation)?;
        if let Some(borders) = &params.borders {
            self.borders("w:tblBorders", borders)?;
        }
        self.opt_value("w:tblLook", &params.look)?;
        self.end("w:tblPr")
    }

    fn row(&mut self, row: &TableRow) -> Result<()> {
        self.start("w:tr", &[])?;
        if let Some(params) = &row.params {
            self.row_params(params)?;
        }
        for cell in &row.cells {
            self.cell(cell)?;
        }
        self.end("w:tr")
    }

    fn row_params(&mut self, params: &RowParams) -> Result<()> {
        self.start("w:trPr", &[])?;
        self.opt_value("w:cantSplit", &params.cant_split)?;
        self.opt_value("w:trHeight", &params.height)?;
        self.opt_value("w:tblHeader", &params.header)?;
        self.end("w:trPr")
    }

    fn cell(&mut self, cell: &TableCell) -> Result<()> {
        self.start("w:tc", &[])?;
        if !cell.params.is_empty() {
            self.cell_params(&cell.params)?;
        }
        if cell.items.is_empty() {
            // A cell must end with a block element
            self.empty("w:p")?;
        }
        for item in &cell.items {
            self.item(item)?;
        }
        self.end("w:tc")
    }

    fn cell_params(&mut self, params: &CellParams) -> Result<()> {
        self.start("w:tcPr", &[])?;
        self.opt_value("w:tcW", &params.width)?;
        self.opt_value("w:gridSpan", &params.grid_span)?;
        if let Some(merge) = params.vertical_merge {
            let mut element = BytesStart::new("w:vMerge");
            if merge == VerticalMerge::Restart {
                element.push_attribute(("w:val", "restart"));
            }
            self.writer.write_event(Event::Empty(element))?;
        }
        if let Some(borders) = &params.borders {
            self.borders("w:tcBorders", borders)?;
        }
        self.opt_value("w:shd", &params.shading)?;
        self.opt_value("w:vAlign", &params.vertical_align)?;
        self.end("w:tcPr")
    }
}

impl Document {
    /// Encode the document as XML into `out`
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        DocumentWriter::new(out).document(self)
    }

    /// Encode the document as XML bytes
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}
