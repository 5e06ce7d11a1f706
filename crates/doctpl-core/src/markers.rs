//! Template marker syntax.
//!
//! A marker is `{{ Identifier }}` where the identifier is made of word
//! characters, `.` and `|`, optionally followed by `:length`. Table cells
//! may also carry merge markers (`[v-merge]`, `[index:1.2]`) that are
//! removed once the vertical merge is resolved.

use std::sync::OnceLock;

use regex::Regex;

fn marker_re() -> &'static Regex {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    MARKER_RE.get_or_init(|| Regex::new(r"\{\{\s*([\w|.]+)(:length)?\s*\}\}").unwrap())
}

fn merge_re() -> &'static Regex {
    static MERGE_RE: OnceLock<Regex> = OnceLock::new();
    MERGE_RE.get_or_init(|| Regex::new(r"\[\s?v-merge\s?\]").unwrap())
}

fn index_re() -> &'static Regex {
    static INDEX_RE: OnceLock<Regex> = OnceLock::new();
    INDEX_RE.get_or_init(|| Regex::new(r"\[\s?index\s?:\s?[\d|.,]+\s?\]").unwrap())
}

/// Whether `text` holds at least one complete marker
pub fn contains_marker(text: &str) -> bool {
    marker_re().is_match(text)
}

/// A marker found in run or cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Identifier as written, `.` separated
    pub identifier: &'a str,
    /// Whether the marker asks for a list length (`{{Items:length}}`)
    pub length: bool,
}

/// Markers of `text`, left to right
pub fn markers(text: &str) -> impl Iterator<Item = Marker<'_>> {
    marker_re().captures_iter(text).filter_map(|caps| {
        Some(Marker {
            identifier: caps.get(1)?.as_str(),
            length: caps.get(2).is_some(),
        })
    })
}

/// Rewrite every marker into the evaluator's flat form
///
/// `{{ Customer.Name }}` becomes `{{{Customer_Name}}}` and
/// `{{Items:length}}` becomes `{{{Items_length}}}`. Triple braces ask the
/// evaluator for unescaped output; the document encoder escapes the text.
/// Text outside markers is left alone.
pub fn transform(text: &str) -> String {
    marker_re()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let mut out = String::from("{{{");
            out.push_str(&caps[1].replace('.', "_"));
            if caps.get(2).is_some() {
                out.push_str("_length");
            }
            out.push_str("}}}");
            out
        })
        .into_owned()
}

/// Whether `text` carries a `[v-merge]` marker
pub fn has_merge_marker(text: &str) -> bool {
    merge_re().is_match(text)
}

/// Remove `[v-merge]` and `[index:…]` markers
pub fn strip_merge_markers(text: &str) -> String {
    let text = merge_re().replace_all(text, "");
    index_re().replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_grammar() {
        assert!(contains_marker("{{Name}}"));
        assert!(contains_marker("Dear {{ Customer.Name }},"));
        assert!(contains_marker("{{a|b}}"));
        assert!(contains_marker("{{Items:length}}"));
        assert!(!contains_marker("{{Customer-Name}}"));
        assert!(!contains_marker("{{ }}"));
        assert!(!contains_marker("{{Name"));
        assert!(!contains_marker("plain text"));
    }

    #[test]
    fn test_markers_in_order() {
        let found: Vec<_> = markers("{{Items:length}} x {{ Items.Name }}, {{y}").collect();
        assert_eq!(
            found,
            [
                Marker { identifier: "Items", length: true },
                Marker { identifier: "Items.Name", length: false },
            ]
        );
        assert_eq!(markers("plain").count(), 0);
    }

    #[test]
    fn test_transform() {
        assert_eq!(transform("{{Name}}"), "{{{Name}}}");
        assert_eq!(transform("Dear {{ Customer.Name }}."), "Dear {{{Customer_Name}}}.");
        assert_eq!(transform("{{Items:length}} items"), "{{{Items_length}}} items");
        assert_eq!(transform("{{a|b.c}}"), "{{{a|b_c}}}");
        assert_eq!(transform("v1.2 {{X}}"), "v1.2 {{{X}}}");
    }

    #[test]
    fn test_merge_markers() {
        assert!(has_merge_marker("[v-merge]Total"));
        assert!(has_merge_marker("[ v-merge ]Total"));
        assert!(!has_merge_marker("[merge]Total"));
        assert_eq!(strip_merge_markers("[v-merge]Total"), "Total");
        assert_eq!(strip_merge_markers("[v-merge][index:1.2]A"), "A");
        assert_eq!(strip_merge_markers("[ index : 3,4 ]B[v-merge]"), "B");
    }
}
