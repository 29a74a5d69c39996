use serde::{Deserialize, Serialize};

/// A stroke applied to a shape outline or emitted as a standalone line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    /// Uppercase 6-hex colour.
    pub color: String,
    /// Stroke width in points.
    pub width: f64,
}

/// The kind of shadow. Only outer shadows are ever emitted; CSS `inset`
/// shadows are dropped during parsing because the downstream renderer
/// produces corrupt files for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowKind {
    #[default]
    Outer,
}

/// A parsed CSS box-shadow in the downstream renderer's vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterShadow {
    #[serde(rename = "type")]
    pub kind: ShadowKind,
    /// Direction of the offset in degrees; 0 = right, 90 = down.
    pub angle: f64,
    /// Blur radius in points.
    pub blur: f64,
    /// Uppercase 6-hex colour.
    pub color: String,
    /// Offset distance in points (hypotenuse of the CSS dx/dy).
    pub offset: f64,
    /// Opacity of the shadow colour, 0.0-1.0.
    pub opacity: f64,
}

/// Visual styling of a shape record derived from a styled container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill colour as uppercase 6-hex; absent when the container only has a
    /// border.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Fill transparency as integer percent, 0 = opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
    /// Uniform border, when one is drawn by the shape itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<StrokeStyle>,
    /// Corner radius in inches. The downstream renderer treats `1` as a full
    /// circle, which is how `border-radius >= 50%` is encoded.
    pub rect_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<OuterShadow>,
}
