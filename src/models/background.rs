use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The raw CSS background properties of an element or of the body, captured
/// so the rasterizer can reproduce them on an isolated helper element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyle {
    pub background_image: String,
    pub background_repeat: String,
    pub background_size: String,
    pub background_position: String,
    pub background_color: String,
}

/// The slide background. `Css` and `Gradient` are intermediate forms that the
/// rasterizer always replaces, so a finished description only ever carries
/// `Color` or `Image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    /// A solid colour, as uppercase 6-hex. Always produced when the body has
    /// no background image.
    Color { value: String },
    /// A CSS background image that needs rasterization.
    Css { style: BackgroundStyle },
    /// A CSS gradient that needs rasterization.
    Gradient {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<BackgroundStyle>,
    },
    /// The final rasterized form: a PNG on disk.
    Image { path: PathBuf },
}
