//! Streaming decoder for word/document.xml
//!
//! One forward pass over the token stream. Elements are matched on their
//! local name only, so any namespace prefix (or none) is accepted. Each
//! compound item consumes tokens until its own end tag; children the model
//! has no place for are skipped together with their subtree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::{debug, warn};

use crate::document::{
    Body, BodyParams, CellParams, DocItem, Document, Drawing, ParagraphItem, ParagraphParams,
    RecordItem, RecordParams, RowParams, TableCell, TableItem, TableParams, TableRow, Text,
    VerticalMerge,
};
use crate::error::{OoxmlError, Result};
use crate::values::{attr_value, BorderSet, BorderValue, ElementValue};

pub(crate) struct DocumentReader<'a> {
    reader: Reader<&'a [u8]>,
    /// Set once the tokenizer reports an error; every loop then winds down
    broken: bool,
}

impl<'a> DocumentReader<'a> {
    pub(crate) fn new(xml: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside <w:t> is content
        reader.config_mut().trim_text(false);
        // <w:b/> arrives as Start + End so every element is handled the same way
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            broken: false,
        }
    }

    /// Next token, or `None` at end of input or after a tokenizer error
    fn next(&mut self) -> Option<Event<'a>> {
        if self.broken {
            return None;
        }
        match self.reader.read_event() {
            Ok(Event::Eof) => None,
            Ok(event) => Some(event),
            Err(e) => {
                warn!(
                    position = self.reader.error_position(),
                    "stopping decode at malformed XML: {e}"
                );
                self.broken = true;
                None
            }
        }
    }

    /// Consume tokens up to and including the end tag of the element just opened
    fn skip_element(&mut self) {
        let mut depth = 1usize;
        while let Some(event) = self.next() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Read a value from its start tag and consume the rest of the element
    fn read_value<T: ElementValue>(&mut self, start: &BytesStart<'_>) -> T {
        let value = T::from_element(start);
        self.skip_element();
        value
    }

    pub(crate) fn read_document(&mut self) -> Result<Document> {
        let mut document = Document::default();
        let mut found_body = false;

        while let Some(event) = self.next() {
            if let Event::Start(e) = event {
                match e.local_name().as_ref() {
                    b"document" => read_scheme(&e, &mut document),
                    b"body" => {
                        document.body = self.read_body();
                        found_body = true;
                    }
                    _ => {}
                }
            }
        }

        if !found_body {
            return Err(OoxmlError::InvalidStructure(
                "no body element found".to_string(),
            ));
        }
        Ok(document)
    }

    fn read_body(&mut self) -> Body {
        let mut body = Body::default();
        let mut has_params = false;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"sectPr" {
                        body.params = self.read_body_params();
                        has_params = true;
                    } else if let Some(item) = self.read_item(&e) {
                        body.items.push(item);
                    }
                }
                Event::End(_) => break,
                _ => {}
            }
        }

        if !has_params {
            warn!("body has no sectPr, using default section properties");
        }
        body
    }

    /// Dispatch a start tag to the item constructor for its name
    fn read_item(&mut self, start: &BytesStart<'_>) -> Option<DocItem> {
        match start.local_name().as_ref() {
            b"p" => Some(DocItem::Paragraph(self.read_paragraph(start))),
            b"r" => Some(DocItem::Record(self.read_record())),
            b"tbl" => Some(DocItem::Table(self.read_table())),
            other => {
                debug!(
                    element = %String::from_utf8_lossy(other),
                    "dropping unrecognized element"
                );
                self.skip_element();
                None
            }
        }
    }

    fn read_body_params(&mut self) -> BodyParams {
        let mut params = BodyParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"headerReference" => params.header_reference = Some(self.read_value(&e)),
                    b"footerReference" => params.footer_reference = Some(self.read_value(&e)),
                    b"pgSz" => params.page_size = self.read_value(&e),
                    b"pgMar" => params.page_margin = self.read_value(&e),
                    b"bidi" => params.bidi = Some(self.read_value(&e)),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }

    fn read_paragraph(&mut self, start: &BytesStart<'_>) -> ParagraphItem {
        let mut paragraph = ParagraphItem {
            rsid_r: attr_value(start, b"rsidR").unwrap_or_default(),
            rsid_r_default: attr_value(start, b"rsidRDefault").unwrap_or_default(),
            rsid_p: attr_value(start, b"rsidP").unwrap_or_default(),
            rsid_r_pr: attr_value(start, b"rsidRPr").unwrap_or_default(),
            ..Default::default()
        };

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"pPr" {
                        paragraph.params = self.read_paragraph_params();
                    } else if let Some(item) = self.read_item(&e) {
                        paragraph.items.push(item);
                    }
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        paragraph
    }

    fn read_paragraph_params(&mut self) -> ParagraphParams {
        let mut params = ParagraphParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"pStyle" => params.style = Some(self.read_value(&e)),
                    b"spacing" => params.spacing = Some(self.read_value(&e)),
                    b"jc" => params.justification = Some(self.read_value(&e)),
                    b"bidi" => params.bidi = Some(self.read_value(&e)),
                    b"pBdr" => params.borders = Some(self.read_borders()),
                    b"widowControl" => params.widow_control = Some(self.read_value(&e)),
                    b"ind" => params.indentation = Some(self.read_value(&e)),
                    b"rPr" => params.run_params = Some(self.read_record_params()),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }

    fn read_borders(&mut self) -> BorderSet {
        let mut borders = BorderSet::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => {
                    let value: BorderValue = self.read_value(&e);
                    if let Some(slot) = borders.edge_mut(e.local_name().as_ref()) {
                        *slot = Some(value);
                    }
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        borders
    }

    fn read_record(&mut self) -> RecordItem {
        let mut record = RecordItem::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"rPr" => record.params = Some(self.read_record_params()),
                    b"t" => record.text = self.read_text(&e),
                    b"br" => {
                        record.line_break = true;
                        self.skip_element();
                    }
                    b"tab" => {
                        record.tab = true;
                        self.skip_element();
                    }
                    b"drawing" => record.drawing = Some(self.read_drawing(e.clone())),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        record
    }

    fn read_record_params(&mut self) -> RecordParams {
        let mut params = RecordParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"rFonts" => params.fonts = Some(self.read_value(&e)),
                    b"rtl" => params.rtl = Some(self.read_value(&e)),
                    b"sz" => params.size = Some(self.read_value(&e)),
                    b"szCs" => params.size_cs = Some(self.read_value(&e)),
                    b"lang" => params.lang = Some(self.read_value(&e)),
                    b"u" => params.underline = Some(self.read_value(&e)),
                    b"i" => params.italic = Some(self.read_value(&e)),
                    b"b" => params.bold = Some(self.read_value(&e)),
                    b"bCs" => params.bold_cs = Some(self.read_value(&e)),
                    b"strike" => params.strike = Some(self.read_value(&e)),
                    b"noProof" => params.no_proof = Some(self.read_value(&e)),
                    b"color" => params.color = Some(self.read_value(&e)),
                    b"highlight" => params.highlight = Some(self.read_value(&e)),
                    b"vertAlign" => params.vert_align = Some(self.read_value(&e)),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }

    fn read_text(&mut self, start: &BytesStart<'_>) -> Text {
        let mut text = Text {
            value: String::new(),
            space: attr_value(start, b"space"),
        };
        while let Some(event) = self.next() {
            match event {
                Event::Text(t) => match t.unescape() {
                    Ok(s) => text.value.push_str(&s),
                    Err(e) => warn!("skipping undecodable run text: {e}"),
                },
                Event::CData(c) => text.value.push_str(&String::from_utf8_lossy(&c)),
                Event::Start(_) => self.skip_element(),
                Event::End(_) => break,
                _ => {}
            }
        }
        text
    }

    /// Capture the drawing subtree as markup, byte for byte as tokenized
    fn read_drawing(&mut self, start: BytesStart<'a>) -> Drawing {
        let mut out = Writer::new(Vec::new());
        let mut depth = 1usize;
        let mut events = vec![Event::Start(start)];

        while let Some(event) = self.next() {
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                _ => {}
            }
            events.push(event);
            if depth == 0 {
                break;
            }
        }

        for event in events {
            if let Err(e) = out.write_event(event) {
                warn!("dropping drawing payload: {e}");
                return Drawing::default();
            }
        }
        Drawing {
            xml: String::from_utf8_lossy(&out.into_inner()).into_owned(),
        }
    }

    fn read_table(&mut self) -> TableItem {
        let mut table = TableItem::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tblPr" => table.params = Some(self.read_table_params()),
                    b"tblGrid" => table.grid = Some(self.read_grid()),
                    b"tr" => table.rows.push(self.read_row()),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        table
    }

    fn read_table_params(&mut self) -> TableParams {
        let mut params = TableParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tblStyle" => params.style = Some(self.read_value(&e)),
                    b"tblW" => params.width = Some(self.read_value(&e)),
                    b"jc" => params.justification = Some(self.read_value(&e)),
                    b"tblInd" => params.indentation = Some(self.read_value(&e)),
                    b"tblBorders" => params.borders = Some(self.read_borders()),
                    b"tblLook" => params.look = Some(self.read_value(&e)),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }

    fn read_grid(&mut self) -> Vec<crate::values::GridColumn> {
        let mut columns = Vec::new();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"gridCol" {
                        columns.push(self.read_value(&e));
                    } else {
                        self.skip_element();
                    }
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        columns
    }

    fn read_row(&mut self) -> TableRow {
        let mut row = TableRow::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"trPr" => row.params = Some(self.read_row_params()),
                    b"tc" => row.cells.push(self.read_cell()),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        row
    }

    fn read_row_params(&mut self) -> RowParams {
        let mut params = RowParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"trHeight" => params.height = Some(self.read_value(&e)),
                    b"tblHeader" => params.header = Some(self.read_value(&e)),
                    b"cantSplit" => params.cant_split = Some(self.read_value(&e)),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }

    fn read_cell(&mut self) -> TableCell {
        let mut cell = TableCell::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"tcPr" {
                        cell.params = self.read_cell_params();
                    } else if let Some(item) = self.read_item(&e) {
                        cell.items.push(item);
                    }
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        cell
    }

    fn read_cell_params(&mut self) -> CellParams {
        let mut params = CellParams::default();
        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tcW" => params.width = Some(self.read_value(&e)),
                    b"gridSpan" => params.grid_span = Some(self.read_value(&e)),
                    b"vMerge" => {
                        let merge = match attr_value(&e, b"val").as_deref() {
                            Some("restart") => VerticalMerge::Restart,
                            _ => VerticalMerge::Continue,
                        };
                        params.vertical_merge = Some(merge);
                        self.skip_element();
                    }
                    b"shd" => params.shading = Some(self.read_value(&e)),
                    b"vAlign" => params.vertical_align = Some(self.read_value(&e)),
                    b"tcBorders" => params.borders = Some(self.read_borders()),
                    _ => self.skip_element(),
                },
                Event::End(_) => break,
                _ => {}
            }
        }
        params
    }
}

/// Root attributes: `Ignorable` goes to the skip list, `xmlns:*` bindings to
/// the scheme keyed by prefix
fn read_scheme(start: &BytesStart<'_>, document: &mut Document) {
    for attr in start.attributes().filter_map(|a| a.ok()) {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        let key = attr.key;
        let local = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
        let is_binding = key.prefix().is_some_and(|p| p.as_ref() == b"xmlns");
        if local == "Ignorable" {
            document.skip_scheme = value.into_owned();
        } else if key.as_ref() == b"xmlns" {
            // Default namespace
            document.scheme.insert(String::new(), value.into_owned());
        } else if is_binding {
            document.scheme.insert(local, value.into_owned());
        }
    }
}

impl Document {
    /// Parse a document from XML bytes
    ///
    /// Unknown elements are dropped. Fails only when the input holds no
    /// `body` element to decode.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        DocumentReader::new(xml).read_document()
    }
}
