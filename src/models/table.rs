use serde::{Deserialize, Serialize};

use crate::models::common::{Align, VAlign};
use crate::models::text::TextContent;

/// One edge of a table cell border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBorder {
    /// Border thickness in points.
    pub pt: f64,
    /// Uppercase 6-hex colour.
    pub color: String,
}

/// Resolved styling of a single table cell. Margins follow the downstream
/// renderer's `[left, right, bottom, top]` order; borders are
/// `[top, right, bottom, left]` with `None` for edges that have no border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOptions {
    /// Font size in points.
    pub font_size: f64,
    pub font_face: String,
    /// Uppercase 6-hex colour.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    pub align: Align,
    pub valign: VAlign,
    /// Line spacing in points, only when CSS line-height is not `normal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    /// Cell padding in points, `[left, right, bottom, top]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<[f64; 4]>,
    /// Background fill as uppercase 6-hex, when not transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Borders in `[top, right, bottom, left]` order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<[Option<CellBorder>; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    /// Text transparency as integer percent, 0 = opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

/// A single table cell: its textual payload plus resolved styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: TextContent,
    pub options: CellOptions,
}
