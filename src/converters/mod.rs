//! Converters from input documents to slide-builder calls.

pub mod html;
