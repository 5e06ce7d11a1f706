//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while decoding, encoding or packaging a document
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files, or writing the encoded stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error produced by the XML tokenizer or writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in the package
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// The input has no usable document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Model variant without codec support
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
