//! doctpl CLI - Command-line interface library
//!
//! This library provides the CLI functionality for doctpl:
//! - Render: fill a DOCX template with JSON or TOML data
//! - Text: print the plain text of a document body
//! - Roundtrip: decode and re-encode a document
//!
//! # Library Usage
//!
//! ```ignore
//! use doctpl_cli::{render_command, text_command};
//! use doctpl_core::RenderOptions;
//!
//! render_command(&template, &data, &output, &RenderOptions::default())?;
//! println!("{}", text_command(&output)?);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a template
//! doctpl render invoice.dotx --data order.json --output invoice.docx
//!
//! # Show what a document says
//! doctpl text invoice.docx
//!
//! # Normalize a document without rendering
//! doctpl roundtrip invoice.docx --output clean.docx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{render_command, roundtrip_command, run_cli, text_command, OptionArgs};
