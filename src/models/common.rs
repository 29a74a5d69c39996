use serde::{Deserialize, Serialize};

/// A positioned box on the emitted slide. All fields are in **inches**,
/// measured from the top-left corner of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Distance from the left edge of the slide.
    pub x: f64,
    /// Distance from the top edge of the slide.
    pub y: f64,
    /// Width of the box.
    pub w: f64,
    /// Height of the box.
    pub h: f64,
}

/// A rectangle in CSS pixels, as reported by `getBoundingClientRect()` inside
/// the page. This is the unit the browser speaks; conversions to inches and
/// points happen in the converter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PxRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    /// The x coordinate of the rectangle's centre.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// The y coordinate of the rectangle's centre.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Horizontal text alignment. The CSS values `start` and `end` are normalised
/// to `left` and `right` during extraction; `justify` is passed through to the
/// downstream renderer uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment inside a text box or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}
