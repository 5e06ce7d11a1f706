//! Template container for DOCX/DOTX files
//!
//! A package is a ZIP of parts. Only `word/document.xml` is decoded; every
//! other part is kept as raw bytes and written back unchanged.
//!
//! # Example
//!
//! ```no_run
//! use doctpl_ooxml::Template;
//!
//! let mut template = Template::load("invoice.dotx")?;
//! let mut document = template.document()?;
//! document.body.items.truncate(1);
//! template.set_document(&document)?;
//! template.save("invoice.docx")?;
//! # Ok::<(), doctpl_ooxml::OoxmlError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::iter;
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::document::Document;
use crate::error::{OoxmlError, Result};

/// Path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// A Word template (.dotx) or document (.docx)
#[derive(Debug, Clone)]
pub struct Template {
    /// Encoded main document part
    document_xml: Vec<u8>,
    /// Every other part, by path
    parts: BTreeMap<String, Vec<u8>>,
}

impl Template {
    /// Load a template from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Load a template from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Unpack a ZIP package
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            parts.push((entry.name().to_string(), bytes));
        }

        Self::from_parts(parts)
    }

    /// Build a package from `(path, bytes)` parts
    ///
    /// Fails with [`OoxmlError::MissingFile`] when the main document part is
    /// not among them.
    pub fn from_parts<I, N>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<u8>)>,
        N: Into<String>,
    {
        let mut parts: BTreeMap<String, Vec<u8>> =
            parts.into_iter().map(|(name, bytes)| (name.into(), bytes)).collect();
        let document_xml = parts
            .remove(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))?;

        debug!(parts = parts.len() + 1, "opened package");
        Ok(Self {
            document_xml,
            parts,
        })
    }

    /// Decode the main document part
    pub fn document(&self) -> Result<Document> {
        Document::parse(&self.document_xml)
    }

    /// Encode `document` and store it as the main document part
    ///
    /// The package is left untouched when encoding fails.
    pub fn set_document(&mut self, document: &Document) -> Result<()> {
        let xml = document.to_xml()?;
        debug!(bytes = xml.len(), "replacing {}", DOCUMENT_PART);
        self.document_xml = xml;
        Ok(())
    }

    /// Raw bytes of the main document part
    pub fn document_xml(&self) -> &[u8] {
        &self.document_xml
    }

    /// Raw bytes of any part, the main document included
    pub fn part(&self, path: &str) -> Option<&[u8]> {
        if path == DOCUMENT_PART {
            return Some(&self.document_xml);
        }
        self.parts.get(path).map(Vec::as_slice)
    }

    /// Write the package to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(File::create(path)?)
    }

    /// Write the package to any writer, parts in path order
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut entries: Vec<(&str, &[u8])> = self
            .parts
            .iter()
            .map(|(path, bytes)| (path.as_str(), bytes.as_slice()))
            .chain(iter::once((DOCUMENT_PART, self.document_xml.as_slice())))
            .collect();
        entries.sort_unstable_by_key(|(path, _)| *path);

        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (path, bytes) in entries {
            zip.start_file(path, options)?;
            zip.write_all(bytes)?;
        }
        zip.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParagraphItem;
    use crate::test_utils::{create_minimal_template, extract_document_xml, extract_file};

    #[test]
    fn test_load_from_bytes() {
        let template_bytes = create_minimal_template();
        let result = Template::from_bytes(&template_bytes);
        assert!(
            result.is_ok(),
            "Failed to load template: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_document_decodes_main_part() {
        let template = Template::from_bytes(&create_minimal_template()).unwrap();
        let document = template.document().unwrap();
        assert_eq!(document.plain_text(), "Template");
    }

    #[test]
    fn test_set_document_replaces_only_main_part() {
        let original = create_minimal_template();
        let mut template = Template::from_bytes(&original).unwrap();

        let mut document = template.document().unwrap();
        document.body.items = vec![ParagraphItem::with_text("Replaced").into()];
        template.set_document(&document).unwrap();

        let mut buffer = Cursor::new(Vec::new());
        template.write_to(&mut buffer).unwrap();
        let written = buffer.into_inner();

        let doc_xml = extract_document_xml(&written);
        assert!(doc_xml.contains("Replaced"));
        assert!(!doc_xml.contains("Template"));
        assert_eq!(
            extract_file(&written, "word/styles.xml"),
            extract_file(&original, "word/styles.xml")
        );
        assert_eq!(
            extract_file(&written, "_rels/.rels"),
            extract_file(&original, "_rels/.rels")
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        let mut template = Template::from_bytes(&create_minimal_template()).unwrap();
        let document = template.document().unwrap();
        template.set_document(&document).unwrap();
        template.save(&path).unwrap();

        let reloaded = Template::load(&path).unwrap();
        assert_eq!(
            reloaded.document().unwrap(),
            template.document().unwrap()
        );
        assert_eq!(reloaded.document().unwrap().plain_text(), document.plain_text());
    }

    #[test]
    fn test_failed_encode_leaves_archive_untouched() {
        let mut template = Template::from_bytes(&create_minimal_template()).unwrap();
        let before = template.document_xml().to_vec();

        let mut document = template.document().unwrap();
        document.body.items.push(crate::document::DocItem::Bookmark);
        assert!(template.set_document(&document).is_err());

        assert_eq!(template.document_xml(), before.as_slice());
    }

    #[test]
    fn test_load_from_invalid_bytes() {
        // Completely invalid bytes (not a ZIP)
        let invalid_bytes = b"This is not a ZIP file";
        let result = Template::from_bytes(invalid_bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_truncated_zip() {
        // Start of a valid ZIP but truncated
        let truncated = &[0x50, 0x4b, 0x03, 0x04, 0x00, 0x00];
        let result = Template::from_bytes(truncated);
        assert!(result.is_err());
    }

    #[test]
    fn test_package_without_document_part() {
        let parts = [("[Content_Types].xml", b"<Types/>".to_vec())];
        match Template::from_parts(parts) {
            Err(OoxmlError::MissingFile(path)) => assert_eq!(path, DOCUMENT_PART),
            other => panic!("Expected MissingFile, got {:?}", other),
        }
    }

    #[test]
    fn test_part_lookup() {
        let template = Template::from_parts([
            (DOCUMENT_PART, b"<w:document/>".to_vec()),
            ("word/media/image1.png", vec![0x89, b'P', b'N', b'G', 0, 1]),
        ])
        .unwrap();

        assert_eq!(template.part(DOCUMENT_PART), Some(&b"<w:document/>"[..]));
        assert_eq!(
            template.part("word/media/image1.png"),
            Some(&[0x89, b'P', b'N', b'G', 0, 1][..])
        );
        assert_eq!(template.part("word/styles.xml"), None);
    }

    #[test]
    fn test_parts_are_written_in_path_order() {
        let template = Template::from_parts([
            ("word/styles.xml", b"<w:styles/>".to_vec()),
            (DOCUMENT_PART, b"<w:document/>".to_vec()),
            ("[Content_Types].xml", b"<Types/>".to_vec()),
            ("_rels/.rels", b"<Relationships/>".to_vec()),
        ])
        .unwrap();

        let mut buffer = Cursor::new(Vec::new());
        template.write_to(&mut buffer).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();
        let names: Vec<_> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/styles.xml"
            ]
        );
    }
}
