//! The serde data model: the emitted slide description, its element
//! variants, and the typed form of the in-page DOM snapshot.

pub mod background;
pub mod common;
pub mod description;
pub mod dom;
pub mod elements;
pub mod list;
pub mod placeholder;
pub mod shape;
pub mod table;
pub mod text;

pub use background::{Background, BackgroundStyle};
pub use common::{Align, Position, PxRect, VAlign};
pub use description::SlideDescription;
pub use dom::{BodyProbe, ComputedStyle, DomChild, DomNode, DomSnapshot};
pub use elements::{
    BgImageElement, GradientElement, ImageElement, ImageStyle, LineElement, ListElement,
    ShapeElement, SlideElement, SvgElement, TableElement, TextElement,
};
pub use list::ListStyle;
pub use placeholder::PlaceholderRegion;
pub use shape::{OuterShadow, ShadowKind, ShapeStyle, StrokeStyle};
pub use table::{CellBorder, CellOptions, TableCell};
pub use text::{Bullet, Run, RunOptions, TextContent, TextStyle, TextTag};
