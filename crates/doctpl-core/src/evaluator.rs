//! Expression evaluation for run text.
//!
//! The renderer hands each run that contains markers to an [`Evaluator`]
//! after rewriting the markers into flat `{{{Key}}}` form (see
//! [`crate::markers::transform`]). [`MarkerEvaluator`] is the built-in
//! implementation; any engine with mustache-style lookups can stand in.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{RenderError, Result};

/// Renders a template string against a data context
pub trait Evaluator {
    /// Render `template` with `context` as the lookup scope
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Flat mustache-style evaluator
///
/// `{{{Key}}}` inserts the value of `Key` as is and `{{Key}}` inserts it
/// HTML-escaped. Keys are looked up directly in the context object, without
/// any path walking. Missing keys, `null`, lists and objects render as
/// nothing. A `{{` left without a matching expression is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerEvaluator;

impl MarkerEvaluator {
    /// Create the evaluator
    pub fn new() -> Self {
        Self
    }
}

fn expression_re() -> &'static Regex {
    static EXPRESSION_RE: OnceLock<Regex> = OnceLock::new();
    EXPRESSION_RE.get_or_init(|| {
        Regex::new(r"\{\{\{\s*([^{}\s]+)\s*\}\}\}|\{\{\s*([^{}\s]+)\s*\}\}").unwrap()
    })
}

impl Evaluator for MarkerEvaluator {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for caps in expression_re().captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            check_literal(template, &template[last..whole.start()])?;
            out.push_str(&template[last..whole.start()]);
            out.push_str(&expand(&caps, context));
            last = whole.end();
        }

        check_literal(template, &template[last..])?;
        out.push_str(&template[last..]);
        Ok(out)
    }
}

fn check_literal(template: &str, literal: &str) -> Result<()> {
    if literal.contains("{{") {
        return Err(RenderError::Evaluator {
            template: template.to_string(),
            message: "unclosed or malformed expression".to_string(),
        });
    }
    Ok(())
}

fn expand(caps: &Captures<'_>, context: &Value) -> String {
    if let Some(raw) = caps.get(1) {
        return display(lookup(context, raw.as_str()));
    }
    match caps.get(2) {
        Some(key) => escape_html(&display(lookup(context, key.as_str()))),
        None => String::new(),
    }
}

fn lookup<'a>(context: &'a Value, key: &str) -> Option<&'a Value> {
    context.as_object().and_then(|map| map.get(key))
}

fn display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, context: &Value) -> Result<String> {
        MarkerEvaluator::new().render(template, context)
    }

    #[test]
    fn test_raw_lookup() {
        let ctx = json!({"Customer_Name": "A & B", "Total": 12.5, "Paid": true});
        assert_eq!(
            render("{{{Customer_Name}}}: {{{Total}}} ({{{Paid}}})", &ctx).unwrap(),
            "A & B: 12.5 (true)"
        );
    }

    #[test]
    fn test_double_braces_escape() {
        let ctx = json!({"Name": "<b>\"x\"</b>"});
        assert_eq!(
            render("{{Name}}", &ctx).unwrap(),
            "&lt;b&gt;&quot;x&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_missing_and_structured_values_render_empty() {
        let ctx = json!({"Null": null, "List": [1], "Map": {"a": 1}});
        assert_eq!(
            render("[{{{Missing}}}{{{Null}}}{{{List}}}{{{Map}}}]", &ctx).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_non_object_context() {
        assert_eq!(render("x{{{A}}}y", &json!([1, 2])).unwrap(), "xy");
    }

    #[test]
    fn test_text_without_expressions() {
        assert_eq!(render("plain } text", &json!({})).unwrap(), "plain } text");
    }

    #[test]
    fn test_unclosed_expression_is_error() {
        let err = render("{{{A}}} and {{B", &json!({"A": 1})).unwrap_err();
        assert!(matches!(err, RenderError::Evaluator { .. }));
        assert!(err.to_string().contains("{{B"));
    }

    #[test]
    fn test_malformed_expression_is_error() {
        assert!(render("{{a b}}", &json!({})).is_err());
    }
}
