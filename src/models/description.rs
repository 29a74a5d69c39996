use serde::{Deserialize, Serialize};

use crate::models::background::Background;
use crate::models::elements::SlideElement;
use crate::models::placeholder::PlaceholderRegion;

/// The declarative description of one slide: what the extractor produces,
/// the rasterizer rewrites, and the emitter turns into builder calls.
///
/// Elements are kept in DOM document order; the emitter preserves that order,
/// so z-order on the finished slide matches the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescription {
    pub background: Background,
    pub elements: Vec<SlideElement>,
    pub placeholders: Vec<PlaceholderRegion>,
    /// Content-rule violations accumulated during extraction. Geometry and
    /// resource checks append to this before validation decides the outcome.
    pub errors: Vec<String>,
}
