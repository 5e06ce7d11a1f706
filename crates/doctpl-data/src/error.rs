//! Error types for template data.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or converting template data
#[derive(Debug, Error)]
pub enum DataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Data file extension not recognized
    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    /// Invalid JSON, or a value that cannot be represented as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
