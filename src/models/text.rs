use serde::{Deserialize, Serialize};

use crate::models::common::{Align, VAlign};

/// The HTML tag a text element was extracted from. Recorded on the element so
/// downstream consumers can distinguish headings from body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Div,
}

impl TextTag {
    /// Parses a lowercase HTML tag name into a `TextTag`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(TextTag::P),
            "h1" => Some(TextTag::H1),
            "h2" => Some(TextTag::H2),
            "h3" => Some(TextTag::H3),
            "h4" => Some(TextTag::H4),
            "h5" => Some(TextTag::H5),
            "h6" => Some(TextTag::H6),
            "div" => Some(TextTag::Div),
            _ => None,
        }
    }
}

/// A bullet marker attached to the first run of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// Distance in points between the bullet glyph and the item text.
    pub indent: f64,
}

/// Per-run styling overrides. Only the options that differ from the enclosing
/// element's base style are set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Uppercase 6-hex colour, no `#` prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Transparency as integer percent, 0 = opaque (complement of CSS alpha).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
    /// Set on the last run of a list item to terminate it. A list with N
    /// items carries exactly N-1 of these.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_line: Option<bool>,
    /// Present on the first run of a list item when bullets are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

/// A contiguous substring of a text element with uniform inline styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: String,
    pub options: RunOptions,
}

impl Run {
    pub fn new(text: impl Into<String>, options: RunOptions) -> Self {
        Run {
            text: text.into(),
            options,
        }
    }
}

/// The textual payload of a text element or table cell: either a single plain
/// string (uniform styling from the element itself) or an ordered run
/// sequence (mixed inline formatting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Runs(Vec<Run>),
}

impl TextContent {
    /// Returns true when the payload contains no visible text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            TextContent::Plain(s) => s.trim().is_empty(),
            TextContent::Runs(runs) => runs.is_empty(),
        }
    }
}

/// The resolved base style of a text element. Lengths in points, margins in
/// the downstream renderer's `[left, right, bottom, top]` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    /// First entry of the CSS font-family list, quotes stripped.
    pub font_face: String,
    /// Uppercase 6-hex colour.
    pub color: String,
    pub align: Align,
    /// Line spacing in points. Only set when CSS line-height is not `normal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    /// Space before the paragraph in points (from the CSS top margin).
    pub para_space_before: f64,
    /// Space after the paragraph in points (from the CSS bottom margin).
    pub para_space_after: f64,
    /// Internal padding in points, `[left, right, bottom, top]`.
    pub margin: [f64; 4],
    /// Set only for plain-string text, derived from the element's own style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Clockwise rotation in degrees, absent when the element is unrotated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    /// Transparency as integer percent, 0 = opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<VAlign>,
}
