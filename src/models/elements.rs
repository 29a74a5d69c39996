use serde::{Deserialize, Serialize};

use crate::models::background::BackgroundStyle;
use crate::models::common::Position;
use crate::models::list::ListStyle;
use crate::models::shape::ShapeStyle;
use crate::models::table::TableCell;
use crate::models::text::{Run, TextContent, TextStyle, TextTag};

/// CSS presentation details of an `<img>` the downstream renderer cannot
/// express directly. When any of them requires baking, the rasterizer
/// screenshots the image and drops this style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    pub object_fit: String,
    pub object_position: String,
    pub border_radius: String,
}

/// An `<img>` element. `src` is the raw attribute value until rasterization
/// rewrites it to a local PNG path (when baking was required).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub src: String,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
}

/// An inline `<svg>` subtree, serialized as markup. Intermediate; always
/// rasterized into an [`ImageElement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgElement {
    pub svg: String,
    pub position: Position,
}

/// A container's CSS background image. Intermediate; always rasterized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgImageElement {
    pub position: Position,
    pub style: BackgroundStyle,
}

/// A CSS gradient fill. Intermediate; always rasterized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientElement {
    pub gradient: String,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BackgroundStyle>,
}

/// A straight border line synthesized from a non-uniform or
/// image-overlapping container border. Endpoints in inches, already inset by
/// half the stroke width so the stroke centres on the box edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Stroke width in points.
    pub width: f64,
    /// Uppercase 6-hex colour.
    pub color: String,
}

/// A styled container's visual body: background fill and/or uniform border,
/// rendered under any child text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub position: Position,
    pub shape: ShapeStyle,
}

/// A `<table>`. Column widths and row heights are in inches and scaled so
/// they sum exactly to the table's own rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub rows: Vec<Vec<TableCell>>,
    pub position: Position,
    pub col_w: Vec<f64>,
    pub row_h: Vec<f64>,
}

/// A `<ul>`/`<ol>`. Items are a flat run sequence; each item is terminated by
/// `break_line` on its last run (except the final item) and starts with a
/// `bullet` option when bullets are enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListElement {
    pub items: Vec<Run>,
    pub position: Position,
    pub style: ListStyle,
}

/// A text element extracted from `<p>`, `<h1>..<h6>`, or a qualifying
/// `<div>`/flex-child `<span>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub tag: TextTag,
    pub text: TextContent,
    pub position: Position,
    pub style: TextStyle,
}

/// A positioned visual element of the slide description. This is a closed
/// sum: the rasterizer and the emitter both match it exhaustively, so an
/// unhandled variant is a compile error. After rasterization no `Svg`,
/// `BgImage`, or `Gradient` variant remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideElement {
    Image(ImageElement),
    Svg(SvgElement),
    BgImage(BgImageElement),
    Gradient(GradientElement),
    Line(LineElement),
    Shape(ShapeElement),
    Table(TableElement),
    List(ListElement),
    Text(TextElement),
}

impl SlideElement {
    /// The on-slide bounding box of the element, when it carries one.
    /// `Line` elements are described by endpoints instead.
    pub fn position(&self) -> Option<&Position> {
        match self {
            SlideElement::Image(e) => Some(&e.position),
            SlideElement::Svg(e) => Some(&e.position),
            SlideElement::BgImage(e) => Some(&e.position),
            SlideElement::Gradient(e) => Some(&e.position),
            SlideElement::Line(_) => None,
            SlideElement::Shape(e) => Some(&e.position),
            SlideElement::Table(e) => Some(&e.position),
            SlideElement::List(e) => Some(&e.position),
            SlideElement::Text(e) => Some(&e.position),
        }
    }
}
