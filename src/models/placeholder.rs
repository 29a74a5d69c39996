use serde::{Deserialize, Serialize};

/// A named rectangular region reserved on the slide for content the caller
/// inserts afterwards (charts and other non-HTML material). Emitted for any
/// non-table element whose class list contains `placeholder`; its subtree is
/// not inspected further. Coordinates in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderRegion {
    /// The element's `id` attribute.
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
