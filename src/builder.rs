use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::common::{Align, Position, VAlign};
use crate::models::shape::{OuterShadow, StrokeStyle};
use crate::models::table::TableCell;
use crate::models::text::TextContent;

/// Handle to a slide inside the presentation builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(pub usize);

/// The presentation's slide layout, in EMUs (914400 per inch). The builder
/// must be pre-configured with a layout matching the HTML body size to
/// within 0.1 inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideLayout {
    pub width: f64,
    pub height: f64,
}

impl SlideLayout {
    /// Layout width in inches.
    pub fn width_in(&self) -> f64 {
        self.width / crate::converters::html::constants::EMU_PER_IN
    }

    /// Layout height in inches.
    pub fn height_in(&self) -> f64 {
        self.height / crate::converters::html::constants::EMU_PER_IN
    }
}

/// Shape geometry supported by the downstream renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Line,
}

/// The slide background, in its final (post-rasterization) form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideBackground {
    /// Uppercase 6-hex colour.
    Color { color: String },
    /// Path to a rasterized PNG.
    Image { path: PathBuf },
}

/// Options for [`SlideBuilder::add_image`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub path: PathBuf,
    pub position: Position,
}

/// Options for [`SlideBuilder::add_shape`]. For `ShapeKind::Line` the
/// position encodes the endpoints as `(x, y)`-`(x+w, y+h)`, so `w`/`h` may
/// legitimately be zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeOptions {
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<StrokeStyle>,
}

/// Options for [`SlideBuilder::add_text`], mirroring the downstream
/// renderer's flat option bag. Margins are `[left, right, bottom, top]` in
/// points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<StrokeStyle>,
    /// Corner radius in inches; `1` renders as a full circle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<OuterShadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub para_space_before: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub para_space_after: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
    /// Text inset in inches; the emitter always passes 0 for text boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inset: Option<f64>,
}

/// Options for [`SlideBuilder::add_table`]. When explicit column widths or
/// row heights are present, the corresponding overall dimension is omitted
/// and the renderer derives it from the arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    /// Column widths in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_w: Option<Vec<f64>>,
    /// Row heights in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_h: Option<Vec<f64>>,
}

/// The presentation-builder seam: an abstract slide surface the emitter
/// drives in document order. Implementations record or render the calls;
/// writing the binary presentation file is outside the engine's scope, so
/// the calls are in-memory and infallible.
pub trait SlideBuilder {
    /// The presentation's configured slide layout in EMUs.
    fn layout(&self) -> SlideLayout;

    /// Appends a new slide and returns its handle.
    fn add_slide(&mut self) -> SlideId;

    fn set_background(&mut self, slide: SlideId, background: &SlideBackground);

    fn add_image(&mut self, slide: SlideId, options: &ImageOptions);

    fn add_shape(&mut self, slide: SlideId, kind: ShapeKind, options: &ShapeOptions);

    fn add_text(&mut self, slide: SlideId, text: &TextContent, options: &TextOptions);

    fn add_table(&mut self, slide: SlideId, rows: &[Vec<TableCell>], options: &TableOptions);
}
