//! Error types for template rendering

use thiserror::Error;

/// Errors that can occur while rendering a template
#[derive(Error, Debug)]
pub enum RenderError {
    /// The expression evaluator rejected a run's text
    #[error("Cannot evaluate {template:?}: {message}")]
    Evaluator { template: String, message: String },

    /// Decoding or encoding the document failed
    #[error(transparent)]
    Ooxml(#[from] doctpl_ooxml::OoxmlError),

    /// Loading the template data failed
    #[error(transparent)]
    Data(#[from] doctpl_data::DataError),

    /// Render options could not be parsed
    #[error("Invalid render options: {0}")]
    Config(#[from] toml::de::Error),

    /// Error reading the render options file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering
pub type Result<T> = std::result::Result<T, RenderError>;
