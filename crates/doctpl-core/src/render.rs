//! Document rendering.
//!
//! Rendering walks the body in document order. Paragraphs have their runs
//! coalesced, runs holding markers are substituted through the
//! [`Evaluator`], tables have their bound rows expanded and their
//! `[v-merge]` cells resolved.
//!
//! An error aborts the walk: the document keeps whatever was rendered
//! before the failure.

use doctpl_data::{flatten_fields, Value};
use doctpl_ooxml::{DocItem, Document, RecordItem, TableRow, Template};
use tracing::{debug, trace};

use crate::coalesce::coalesce_runs;
use crate::config::RenderOptions;
use crate::error::Result;
use crate::evaluator::{Evaluator, MarkerEvaluator};
use crate::markers::{contains_marker, transform};
use crate::merge::resolve_vertical_merge;

/// Data visible while rendering part of the document
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    /// Structured data that table rows bind against
    pub data: &'a Value,
    /// Context handed to the evaluator
    pub lookup: &'a Value,
}

/// Renders documents with a given evaluator and options
pub struct Renderer<'e> {
    evaluator: &'e dyn Evaluator,
    options: RenderOptions,
}

impl<'e> Renderer<'e> {
    /// Create a renderer with default options
    pub fn new(evaluator: &'e dyn Evaluator) -> Self {
        Self::with_options(evaluator, RenderOptions::default())
    }

    /// Create a renderer with custom options
    pub fn with_options(evaluator: &'e dyn Evaluator, options: RenderOptions) -> Self {
        Self { evaluator, options }
    }

    /// Options this renderer was built with
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `document` in place against `data`
    pub fn render(&self, document: &mut Document, data: &Value) -> Result<()> {
        let flat;
        let lookup = if self.options.flatten_root_context {
            flat = Value::Object(flatten_fields(data));
            &flat
        } else {
            data
        };

        debug!(items = document.body.items.len(), "Rendering document");
        self.render_items(&mut document.body.items, Scope { data, lookup })
    }

    /// Render the main document part of `template`
    ///
    /// The package is only updated when rendering succeeds.
    pub fn render_template(&self, template: &mut Template, data: &Value) -> Result<()> {
        let mut document = template.document()?;
        self.render(&mut document, data)?;
        template.set_document(&document)?;
        Ok(())
    }

    pub(crate) fn render_items(&self, items: &mut [DocItem], scope: Scope<'_>) -> Result<()> {
        for item in items {
            self.render_item(item, scope)?;
        }
        Ok(())
    }

    fn render_item(&self, item: &mut DocItem, scope: Scope<'_>) -> Result<()> {
        match item {
            DocItem::Paragraph(paragraph) => {
                if self.options.coalesce_runs {
                    paragraph.items = coalesce_runs(std::mem::take(&mut paragraph.items));
                }
                self.render_items(&mut paragraph.items, scope)
            }
            DocItem::Record(record) => self.render_record(record, scope),
            DocItem::Table(table) => {
                self.render_table(table, scope)?;
                if self.options.resolve_vertical_merge {
                    resolve_vertical_merge(table);
                }
                Ok(())
            }
            DocItem::Bookmark => Ok(()),
        }
    }

    fn render_record(&self, record: &mut RecordItem, scope: Scope<'_>) -> Result<()> {
        if !contains_marker(&record.text.value) {
            return Ok(());
        }

        let template = transform(&record.text.value);
        let rendered = self.evaluator.render(&template, scope.lookup)?;
        trace!(template = %template, rendered = %rendered, "Substituted run");

        // Word drops edge whitespace unless told to keep it
        if rendered.starts_with(char::is_whitespace) || rendered.ends_with(char::is_whitespace) {
            record.text.space = Some("preserve".to_string());
        }
        record.text.value = rendered;
        Ok(())
    }

    pub(crate) fn render_row(&self, row: &mut TableRow, scope: Scope<'_>) -> Result<()> {
        for cell in &mut row.cells {
            self.render_items(&mut cell.items, scope)?;
        }
        Ok(())
    }
}

/// Render `document` with the built-in evaluator and default options
pub fn render_document(document: &mut Document, data: &Value) -> Result<()> {
    Renderer::new(&MarkerEvaluator).render(document, data)
}

/// Render `template` with the built-in evaluator and default options
pub fn render_template(template: &mut Template, data: &Value) -> Result<()> {
    Renderer::new(&MarkerEvaluator).render_template(template, data)
}
