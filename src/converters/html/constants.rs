//! Unit constants, tag whitelists, and calibration values used across the
//! HTML-to-slide pipeline.

/// Points per CSS pixel at the standard 96 DPI.
pub const PT_PER_PX: f64 = 0.75;
/// CSS pixels per inch.
pub const PX_PER_IN: f64 = 96.0;
/// Points per inch.
pub const PT_PER_IN: f64 = 72.0;
/// English Metric Units per inch, the unit of the builder's slide layout.
pub const EMU_PER_IN: f64 = 914400.0;

/// Tags whose text and inline descendants form a text element.
pub const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li"];

/// Inline formatting wrappers the run flattener recognises as style
/// overrides.
pub const INLINE_WRAPPER_TAGS: &[&str] = &["span", "b", "strong", "i", "em", "u", "code"];

/// The full inline whitelist a text container's element children must come
/// from.
pub const INLINE_TEXT_TAGS: &[&str] = &[
    "span", "b", "strong", "i", "em", "u", "code", "br", "small", "sup", "sub", "a",
];

/// Font families that ship a single weight; bold emission is suppressed for
/// them even when the computed weight says otherwise.
pub const SINGLE_WEIGHT_FAMILIES: &[&str] = &["impact"];

/// Glyphs that indicate a hand-written bullet at the start of a text element.
pub const MANUAL_BULLET_GLYPHS: &[char] =
    &['\u{2022}', '-', '*', '\u{25AA}', '\u{25B8}', '\u{25CB}', '\u{25CF}', '\u{25C6}', '\u{25C7}', '\u{25A0}', '\u{25A1}'];

/// Body overflow up to this many pixels is tolerated.
pub const OVERFLOW_TOLERANCE_PX: f64 = 1.0;
/// Body size may differ from the slide layout by up to this many inches.
pub const LAYOUT_TOLERANCE_IN: f64 = 0.1;
/// Text with a font size above [`BOTTOM_GUARD_MIN_PT`] must end at least
/// this far from the slide bottom, in inches.
pub const BOTTOM_GUARD_IN: f64 = 0.5;
pub const BOTTOM_GUARD_MIN_PT: f64 = 12.0;

/// Relative width expansion applied to single-line text boxes, compensating
/// for the downstream renderer's systematic width underestimation.
pub const SINGLE_LINE_EXPANSION: f64 = 0.02;
