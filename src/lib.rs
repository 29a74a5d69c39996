//! Translates a single rendered HTML document into a declarative slide
//! description and drives an abstract PowerPoint slide builder with it.
//!
//! The engine inspects the laid-out DOM inside a headless browser (the
//! [`host::PageHost`] seam), classifies each element into an emission
//! category, flattens inline formatting into styled runs, rasterizes the
//! CSS constructs the downstream renderer cannot express, enforces the HTML
//! content contract, and emits positioned elements in document order onto a
//! [`builder::SlideBuilder`].

pub mod builder;
pub mod converters;
pub mod errors;
pub mod host;
pub mod models;

#[cfg(feature = "chrome")]
pub mod chrome;

pub use builder::{ShapeKind, SlideBackground, SlideBuilder, SlideId, SlideLayout};
pub use converters::html::{describe, translate, TranslateOptions, Translated};
pub use errors::{Result, TranslateError};
pub use host::PageHost;
pub use models::{PlaceholderRegion, SlideDescription};

#[cfg(feature = "chrome")]
pub use chrome::{translate_file, ChromeHost};
