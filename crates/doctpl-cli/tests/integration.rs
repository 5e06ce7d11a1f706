//! Integration tests for doctpl CLI
//!
//! These tests drive the commands end to end:
//! template + data -> rendered DOCX -> plain text

use std::fs;
use std::io::{Cursor, Read, Write};

use doctpl_cli::{render_command, roundtrip_command, text_command};
use doctpl_core::RenderOptions;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t xml:space="preserve">Invoice {{</w:t></w:r><w:r><w:t>Number}}</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>{{Items.Name}}</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>{{Items.Qty}}</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
    <w:p><w:r><w:t xml:space="preserve">{{Items:length}} lines for {{Customer.Name}}</w:t></w:r></w:p>
    <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
  </w:body>
</w:document>"#;

const ORDER_JSON: &str = r#"{
    "Number": "INV-7",
    "Customer": {"Name": "ACME"},
    "Items": [{"Name": "Bolt", "Qty": 10}, {"Name": "Nut", "Qty": 25}]
}"#;

const ORDER_TOML: &str = r#"
Number = "INV-7"

[Customer]
Name = "ACME"

[[Items]]
Name = "Bolt"
Qty = 10

[[Items]]
Name = "Nut"
Qty = 25
"#;

// Table rows have no separator in the plain-text projection
const RENDERED_TEXT: &str = "Invoice INV-7\nBolt10Nut25\n2 lines for ACME";

/// Create a minimal DOTX template around `document`
fn create_test_template(document: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#).unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#).unwrap();

    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#)
        .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

fn read_part(path: &std::path::Path, name: &str) -> String {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_render_docx_with_json() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("invoice.dotx");
    let data = dir.path().join("order.json");
    let output = dir.path().join("invoice.docx");
    fs::write(&template, create_test_template(DOCUMENT_XML)).unwrap();
    fs::write(&data, ORDER_JSON).unwrap();

    render_command(&template, &data, &output, &RenderOptions::default()).unwrap();

    assert_eq!(text_command(&output).unwrap(), RENDERED_TEXT);
    // Untouched parts come through as they were
    assert!(read_part(&output, "word/styles.xml").starts_with("<w:styles"));
    assert!(read_part(&output, "_rels/.rels").contains("officeDocument"));
}

#[test]
fn test_render_with_toml_data() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("invoice.docx");
    let data = dir.path().join("order.toml");
    let output = dir.path().join("out.docx");
    fs::write(&template, create_test_template(DOCUMENT_XML)).unwrap();
    fs::write(&data, ORDER_TOML).unwrap();

    render_command(&template, &data, &output, &RenderOptions::default()).unwrap();
    assert_eq!(text_command(&output).unwrap(), RENDERED_TEXT);
}

#[test]
fn test_render_bare_document_xml() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let data = dir.path().join("order.json");
    let output = dir.path().join("rendered.xml");
    fs::write(&input, DOCUMENT_XML).unwrap();
    fs::write(&data, ORDER_JSON).unwrap();

    render_command(&input, &data, &output, &RenderOptions::default()).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<w:t>Bolt</w:t>"));
    assert_eq!(text_command(&output).unwrap(), RENDERED_TEXT);
}

#[test]
fn test_render_without_table_expansion() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let data = dir.path().join("order.json");
    let output = dir.path().join("rendered.xml");
    fs::write(&input, DOCUMENT_XML).unwrap();
    fs::write(&data, ORDER_JSON).unwrap();

    let options = RenderOptions {
        expand_tables: false,
        ..Default::default()
    };
    render_command(&input, &data, &output, &options).unwrap();
    assert_eq!(
        text_command(&output).unwrap(),
        "Invoice INV-7\n\n2 lines for ACME"
    );
}

#[test]
fn test_render_missing_input() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("order.json");
    fs::write(&data, ORDER_JSON).unwrap();

    let err = render_command(
        &dir.path().join("missing.docx"),
        &data,
        &dir.path().join("out.docx"),
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_render_unsupported_data_format() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("invoice.docx");
    let data = dir.path().join("order.csv");
    let output = dir.path().join("out.docx");
    fs::write(&template, create_test_template(DOCUMENT_XML)).unwrap();
    fs::write(&data, "Number\nINV-7\n").unwrap();

    let err = render_command(&template, &data, &output, &RenderOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to load data file"));
    assert!(!output.exists());
}

#[test]
fn test_render_error_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("broken.docx");
    let data = dir.path().join("order.json");
    let output = dir.path().join("out.docx");
    // A stray opener next to complete markers cannot be evaluated
    let broken = DOCUMENT_XML.replace(" lines for ", " lines {{ for ");
    fs::write(&template, create_test_template(&broken)).unwrap();
    fs::write(&data, ORDER_JSON).unwrap();

    let err = render_command(&template, &data, &output, &RenderOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to render template"));
    assert!(!output.exists());
}

#[test]
fn test_roundtrip_normalizes_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("source.docx");
    let output = dir.path().join("clean.docx");
    let with_unknown = DOCUMENT_XML.replace(
        "<w:tbl>",
        "<w:customXml><w:p><w:r><w:t>hidden</w:t></w:r></w:p></w:customXml><w:tbl>",
    );
    fs::write(&input, create_test_template(&with_unknown)).unwrap();

    roundtrip_command(&input, &output).unwrap();

    let document = read_part(&output, "word/document.xml");
    assert!(!document.contains("customXml"));
    assert!(document.contains("xmlns:r="));
    let text = text_command(&output).unwrap();
    assert!(!text.contains("hidden"));
    assert_eq!(text, text_command(&input).unwrap());
}
