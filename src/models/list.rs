use serde::{Deserialize, Serialize};

use crate::models::common::Align;

/// Block-level styling of a bullet list, taken from the first `<li>` and the
/// list element itself. Margins follow the renderer's
/// `[left, right, bottom, top]` order; the left entry carries the marker
/// margin derived from the list's `padding-left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStyle {
    /// Font size in points.
    pub font_size: f64,
    pub font_face: String,
    /// Uppercase 6-hex colour.
    pub color: String,
    pub align: Align,
    /// Line spacing in points, only when CSS line-height is not `normal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    /// Space before each item paragraph in points.
    pub para_space_before: f64,
    /// Space after each item paragraph in points.
    pub para_space_after: f64,
    /// `[left, right, bottom, top]` in points.
    pub margin: [f64; 4],
}
