//! Leaf formatting values
//!
//! Each value wraps the attributes of one property element such as
//! `<w:pStyle w:val="Heading1"/>`. The element name belongs to the params
//! block that owns the value; the value itself only knows its attributes.
//! Presence of the element is modelled by `Option<...>` on the owning field,
//! so a value that exists here was present in the source.

use quick_xml::events::BytesStart;

/// A property element that is fully described by its attributes
pub trait ElementValue: Sized {
    /// Read the value from the attributes of its start tag
    fn from_element(element: &BytesStart<'_>) -> Self;

    /// Attributes to emit, with their output prefix (e.g. `w:val`)
    fn attributes(&self) -> Vec<(&'static str, String)>;
}

/// Look up an attribute by local name, ignoring its prefix
pub(crate) fn attr_value(element: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn attr_int(element: &BytesStart<'_>, local: &[u8]) -> Option<i64> {
    attr_value(element, local).and_then(|v| parse_int(&v))
}

fn parse_int(value: &str) -> Option<i64> {
    match value {
        "true" | "on" => Some(1),
        "false" | "off" => Some(0),
        other => other.trim().parse().ok(),
    }
}

fn push_opt<T: ToString>(out: &mut Vec<(&'static str, String)>, name: &'static str, v: &Option<T>) {
    if let Some(v) = v {
        out.push((name, v.to_string()));
    }
}

/// `w:val` string value (`pStyle`, `jc`, `lang`, `color`, ...)
///
/// The attribute is always written, so an empty string survives a round trip
/// as an empty value rather than disappearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringValue {
    pub value: String,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ElementValue for StringValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_value(element, b"val").unwrap_or_default(),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("w:val", self.value.clone())]
    }
}

/// Integer `w:val` (`sz`, `szCs`, `rtl`, `bidi`, `gridSpan`, ...)
///
/// A missing `w:val` is kept as `None` and written back without the attribute,
/// which for toggle properties means "on". Attribute text that is not the
/// plain decimal form of `value` (`on`, `true`, ` 2`, `auto`) is kept in
/// `raw` and written back verbatim while `value` still agrees with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntValue {
    pub value: Option<i64>,
    pub raw: Option<String>,
}

impl IntValue {
    pub fn new(value: i64) -> Self {
        Self {
            value: Some(value),
            raw: None,
        }
    }

    fn parse(text: String) -> Self {
        let value = parse_int(&text);
        let canonical = value.is_some_and(|v| v.to_string() == text);
        Self {
            value,
            raw: (!canonical).then_some(text),
        }
    }

    /// Attribute text to write, if any
    pub fn text(&self) -> Option<String> {
        match &self.raw {
            Some(raw) if parse_int(raw) == self.value => Some(raw.clone()),
            _ => self.value.map(|v| v.to_string()),
        }
    }
}

impl ElementValue for IntValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        attr_value(element, b"val")
            .map(Self::parse)
            .unwrap_or_default()
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:val", &self.text());
        out
    }
}

/// Presence-only marker (`b`, `i`, `bCs`, `strike`, `noProof`, `tblHeader`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyValue;

impl ElementValue for EmptyValue {
    fn from_element(_element: &BytesStart<'_>) -> Self {
        EmptyValue
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Page size (`pgSz`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeValue {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub orient: Option<String>,
}

impl ElementValue for SizeValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            width: attr_int(element, b"w"),
            height: attr_int(element, b"h"),
            orient: attr_value(element, b"orient"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:w", &self.width);
        push_opt(&mut out, "w:h", &self.height);
        push_opt(&mut out, "w:orient", &self.orient);
        out
    }
}

/// Margins and indentation (`pgMar`, `ind`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarginValue {
    pub top: Option<i64>,
    pub right: Option<i64>,
    pub bottom: Option<i64>,
    pub left: Option<i64>,
    pub header: Option<i64>,
    pub footer: Option<i64>,
    pub gutter: Option<i64>,
    pub first_line: Option<i64>,
    pub hanging: Option<i64>,
}

impl ElementValue for MarginValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            top: attr_int(element, b"top"),
            right: attr_int(element, b"right"),
            bottom: attr_int(element, b"bottom"),
            left: attr_int(element, b"left"),
            header: attr_int(element, b"header"),
            footer: attr_int(element, b"footer"),
            gutter: attr_int(element, b"gutter"),
            first_line: attr_int(element, b"firstLine"),
            hanging: attr_int(element, b"hanging"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:top", &self.top);
        push_opt(&mut out, "w:right", &self.right);
        push_opt(&mut out, "w:bottom", &self.bottom);
        push_opt(&mut out, "w:left", &self.left);
        push_opt(&mut out, "w:header", &self.header);
        push_opt(&mut out, "w:footer", &self.footer);
        push_opt(&mut out, "w:gutter", &self.gutter);
        push_opt(&mut out, "w:firstLine", &self.first_line);
        push_opt(&mut out, "w:hanging", &self.hanging);
        out
    }
}

/// Paragraph spacing (`spacing`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpacingValue {
    pub before: Option<i64>,
    pub after: Option<i64>,
    pub line: Option<i64>,
    pub line_rule: Option<String>,
}

impl ElementValue for SpacingValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            before: attr_int(element, b"before"),
            after: attr_int(element, b"after"),
            line: attr_int(element, b"line"),
            line_rule: attr_value(element, b"lineRule"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:before", &self.before);
        push_opt(&mut out, "w:after", &self.after);
        push_opt(&mut out, "w:line", &self.line);
        push_opt(&mut out, "w:lineRule", &self.line_rule);
        out
    }
}

/// Pattern with optional color and fill (`u`, `shd`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowValue {
    pub value: Option<String>,
    pub color: Option<String>,
    pub fill: Option<String>,
}

impl ElementValue for ShadowValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_value(element, b"val"),
            color: attr_value(element, b"color"),
            fill: attr_value(element, b"fill"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:val", &self.value);
        push_opt(&mut out, "w:color", &self.color);
        push_opt(&mut out, "w:fill", &self.fill);
        out
    }
}

/// Named style keyword (`highlight`, `vertAlign`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleValue {
    pub value: String,
}

impl ElementValue for StyleValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_value(element, b"val").unwrap_or_default(),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("w:val", self.value.clone())]
    }
}

/// Header or footer reference (`headerReference`, `footerReference`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceValue {
    /// `default`, `first` or `even`
    pub kind: String,
    /// Relationship id of the referenced part
    pub id: String,
}

impl ElementValue for ReferenceValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            kind: attr_value(element, b"type").unwrap_or_default(),
            id: attr_value(element, b"id").unwrap_or_default(),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("w:type", self.kind.clone()), ("r:id", self.id.clone())]
    }
}

/// Width with unit (`tblW`, `tcW`, `tblInd`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthValue {
    pub width: Option<i64>,
    /// `dxa`, `pct`, `auto` or `nil`
    pub kind: Option<String>,
}

impl ElementValue for WidthValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            width: attr_int(element, b"w"),
            kind: attr_value(element, b"type"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:w", &self.width);
        push_opt(&mut out, "w:type", &self.kind);
        out
    }
}

/// Row height (`trHeight`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightValue {
    pub value: Option<i64>,
    pub rule: Option<String>,
}

impl ElementValue for HeightValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_int(element, b"val"),
            rule: attr_value(element, b"hRule"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:val", &self.value);
        push_opt(&mut out, "w:hRule", &self.rule);
        out
    }
}

/// Conditional formatting switches of a table style (`tblLook`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookValue {
    pub value: Option<String>,
    pub first_row: Option<String>,
    pub last_row: Option<String>,
    pub first_column: Option<String>,
    pub last_column: Option<String>,
    pub no_h_band: Option<String>,
    pub no_v_band: Option<String>,
}

impl ElementValue for LookValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_value(element, b"val"),
            first_row: attr_value(element, b"firstRow"),
            last_row: attr_value(element, b"lastRow"),
            first_column: attr_value(element, b"firstColumn"),
            last_column: attr_value(element, b"lastColumn"),
            no_h_band: attr_value(element, b"noHBand"),
            no_v_band: attr_value(element, b"noVBand"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:val", &self.value);
        push_opt(&mut out, "w:firstRow", &self.first_row);
        push_opt(&mut out, "w:lastRow", &self.last_row);
        push_opt(&mut out, "w:firstColumn", &self.first_column);
        push_opt(&mut out, "w:lastColumn", &self.last_column);
        push_opt(&mut out, "w:noHBand", &self.no_h_band);
        push_opt(&mut out, "w:noVBand", &self.no_v_band);
        out
    }
}

/// One edge of a border set (`top`, `left`, `insideH`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderValue {
    pub value: Option<String>,
    pub size: Option<i64>,
    pub space: Option<i64>,
    pub color: Option<String>,
}

impl ElementValue for BorderValue {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            value: attr_value(element, b"val"),
            size: attr_int(element, b"sz"),
            space: attr_int(element, b"space"),
            color: attr_value(element, b"color"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:val", &self.value);
        push_opt(&mut out, "w:sz", &self.size);
        push_opt(&mut out, "w:space", &self.space);
        push_opt(&mut out, "w:color", &self.color);
        out
    }
}

/// Border edges (`pBdr`, `tblBorders`, `tcBorders`)
///
/// Unlike the other values this one has child elements, so the codec reads
/// and writes it edge by edge in the order of [`BorderSet::EDGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderSet {
    pub top: Option<BorderValue>,
    pub left: Option<BorderValue>,
    pub bottom: Option<BorderValue>,
    pub right: Option<BorderValue>,
    pub between: Option<BorderValue>,
    pub bar: Option<BorderValue>,
    pub inside_h: Option<BorderValue>,
    pub inside_v: Option<BorderValue>,
}

impl BorderSet {
    /// Edge element names in output order
    pub const EDGES: [&'static str; 8] = [
        "top", "left", "bottom", "right", "between", "bar", "insideH", "insideV",
    ];

    /// Mutable slot for an edge by its local element name
    pub fn edge_mut(&mut self, name: &[u8]) -> Option<&mut Option<BorderValue>> {
        match name {
            b"top" => Some(&mut self.top),
            b"left" | b"start" => Some(&mut self.left),
            b"bottom" => Some(&mut self.bottom),
            b"right" | b"end" => Some(&mut self.right),
            b"between" => Some(&mut self.between),
            b"bar" => Some(&mut self.bar),
            b"insideH" => Some(&mut self.inside_h),
            b"insideV" => Some(&mut self.inside_v),
            _ => None,
        }
    }

    /// Edge by its element name
    pub fn edge(&self, name: &str) -> Option<&BorderValue> {
        match name {
            "top" => self.top.as_ref(),
            "left" => self.left.as_ref(),
            "bottom" => self.bottom.as_ref(),
            "right" => self.right.as_ref(),
            "between" => self.between.as_ref(),
            "bar" => self.bar.as_ref(),
            "insideH" => self.inside_h.as_ref(),
            "insideV" => self.inside_v.as_ref(),
            _ => None,
        }
    }
}

/// Run fonts (`rFonts`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFonts {
    pub ascii: Option<String>,
    pub cs: Option<String>,
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    pub hint: Option<String>,
}

impl ElementValue for RecordFonts {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            ascii: attr_value(element, b"ascii"),
            cs: attr_value(element, b"cs"),
            h_ansi: attr_value(element, b"hAnsi"),
            east_asia: attr_value(element, b"eastAsia"),
            hint: attr_value(element, b"hint"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:ascii", &self.ascii);
        push_opt(&mut out, "w:cs", &self.cs);
        push_opt(&mut out, "w:hAnsi", &self.h_ansi);
        push_opt(&mut out, "w:eastAsia", &self.east_asia);
        push_opt(&mut out, "w:hint", &self.hint);
        out
    }
}

/// Grid column (`gridCol`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridColumn {
    pub width: Option<i64>,
}

impl ElementValue for GridColumn {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            width: attr_int(element, b"w"),
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        push_opt(&mut out, "w:w", &self.width);
        out
    }
}
