//! Unit conversions and computed-style primitives: colour parsing, rotation
//! extraction, box-shadow parsing, font-family normalisation, and
//! text-transform application.

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::*;
use crate::models::common::{Align, Position, PxRect};
use crate::models::shape::{OuterShadow, ShadowKind};

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)(?:\s*,\s*([0-9.]+))?\s*\)$").unwrap()
});

static ROTATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rotate\(\s*(-?[0-9.]+)deg\s*\)").unwrap());

static MATRIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"matrix\(\s*(-?[0-9.e+]+)\s*,\s*(-?[0-9.e+]+)\s*,\s*(-?[0-9.e+]+)\s*,\s*(-?[0-9.e+]+)\s*,\s*(-?[0-9.e+]+)\s*,\s*(-?[0-9.e+]+)\s*\)",
    )
    .unwrap()
});

static SHADOW_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(rgba?\([^)]+\)|#[0-9a-fA-F]{3,8})").unwrap());

static SHADOW_LENGTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(-?[0-9.]+)px").unwrap());

/// Converts CSS pixels to inches.
pub fn px_to_in(px: f64) -> f64 {
    px / PX_PER_IN
}

/// Converts CSS pixels to points.
pub fn px_to_pt(px: f64) -> f64 {
    px * PT_PER_PX
}

/// Parses a computed pixel length such as `"12.5px"`. Anything unparsable
/// (including `"auto"`) reads as zero.
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A computed CSS colour resolved into the renderer's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedColor {
    /// Uppercase 6-hex, no `#`.
    pub hex: String,
    /// Integer percent, 0 = opaque: `round((1 - alpha) * 100)`.
    pub transparency: u32,
    /// The raw CSS alpha, 0.0-1.0, for consumers that must not lose
    /// precision to the percent rounding (shadow opacity).
    pub alpha: f64,
}

/// Parses a computed colour. Returns `None` for fully transparent values
/// (`transparent`, or an alpha of zero).
pub fn parse_color(css: &str) -> Option<ParsedColor> {
    let css = css.trim();
    if css.is_empty() || css.eq_ignore_ascii_case("transparent") {
        return None;
    }
    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(ParsedColor {
                hex: hex.to_ascii_uppercase(),
                transparency: 0,
                alpha: 1.0,
            });
        }
        return None;
    }
    let caps = COLOR_RE.captures(css)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    let alpha: f64 = caps
        .get(4)
        .map(|m| m.as_str().parse().unwrap_or(1.0))
        .unwrap_or(1.0);
    if alpha == 0.0 {
        return None;
    }
    Some(ParsedColor {
        hex: format!("{:02X}{:02X}{:02X}", r, g, b),
        transparency: ((1.0 - alpha) * 100.0).round() as u32,
        alpha,
    })
}

/// Parses a background colour, defaulting fully transparent values to white.
pub fn background_color_or_white(css: &str) -> ParsedColor {
    parse_color(css).unwrap_or(ParsedColor {
        hex: "FFFFFF".to_string(),
        transparency: 0,
        alpha: 1.0,
    })
}

/// Extracts the clockwise rotation in degrees from a computed `transform`
/// plus `writing-mode`, normalised to `[0, 360)`. Zero reads as `None`.
pub fn parse_rotation(transform: &str, writing_mode: &str) -> Option<f64> {
    let mut degrees = if let Some(caps) = ROTATE_RE.captures(transform) {
        caps[1].parse::<f64>().unwrap_or(0.0)
    } else if let Some(caps) = MATRIX_RE.captures(transform) {
        let a: f64 = caps[1].parse().unwrap_or(1.0);
        let b: f64 = caps[2].parse().unwrap_or(0.0);
        b.atan2(a).to_degrees().round()
    } else {
        0.0
    };

    match writing_mode {
        "vertical-rl" => degrees += 90.0,
        "vertical-lr" => degrees += 270.0,
        _ => {}
    }

    let normalized = ((degrees % 360.0) + 360.0) % 360.0;
    if normalized == 0.0 {
        None
    } else {
        Some(normalized)
    }
}

/// Produces the element's unrotated box in inches for a renderer that
/// applies rotation about the box centre.
///
/// The browser reports the rotated bounding rectangle. For quarter turns the
/// unrotated box is the rect with width and height swapped about the same
/// centre; for other angles the element's `offsetWidth`/`offsetHeight` are
/// the unrotated dimensions, again centred on the reported rect.
pub fn corrected_position(
    rect: &PxRect,
    offset_width: f64,
    offset_height: f64,
    rotation: Option<f64>,
) -> Position {
    match rotation {
        None => Position {
            x: px_to_in(rect.left),
            y: px_to_in(rect.top),
            w: px_to_in(rect.width),
            h: px_to_in(rect.height),
        },
        Some(deg) if deg == 90.0 || deg == 270.0 => {
            let w = rect.height;
            let h = rect.width;
            Position {
                x: px_to_in(rect.center_x() - w / 2.0),
                y: px_to_in(rect.center_y() - h / 2.0),
                w: px_to_in(w),
                h: px_to_in(h),
            }
        }
        Some(_) => Position {
            x: px_to_in(rect.center_x() - offset_width / 2.0),
            y: px_to_in(rect.center_y() - offset_height / 2.0),
            w: px_to_in(offset_width),
            h: px_to_in(offset_height),
        },
    }
}

/// Parses a computed `box-shadow` of the form
/// `"rgba(...) dx dy blur spread [inset]"`. Inset shadows are dropped
/// entirely; the downstream renderer cannot represent them.
pub fn parse_box_shadow(css: &str) -> Option<OuterShadow> {
    let css = css.trim();
    if css.is_empty() || css == "none" {
        return None;
    }
    if css.contains("inset") {
        return None;
    }

    let color_match = SHADOW_COLOR_RE.find(css)?;
    let color = parse_color(color_match.as_str())?;
    let rest = &css[color_match.end()..];

    let lengths: Vec<f64> = SHADOW_LENGTH_RE
        .captures_iter(rest)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    if lengths.len() < 2 {
        return None;
    }
    let dx = lengths[0];
    let dy = lengths[1];
    let blur = lengths.get(2).copied().unwrap_or(0.0);

    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }

    Some(OuterShadow {
        kind: ShadowKind::Outer,
        angle,
        blur: blur * PT_PER_PX,
        color: color.hex,
        offset: dx.hypot(dy) * PT_PER_PX,
        opacity: color.alpha,
    })
}

/// First entry of a computed font-family list, quotes stripped.
pub fn first_font_family(css: &str) -> String {
    css.split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// True for families that ship a single weight, where bold emission must be
/// suppressed regardless of the computed weight.
pub fn is_single_weight_family(family: &str) -> bool {
    let lower = family.to_ascii_lowercase();
    SINGLE_WEIGHT_FAMILIES.contains(&lower.as_str())
}

/// Whether a computed `font-weight` renders bold for the given family.
pub fn is_bold_weight(weight: &str, family: &str) -> bool {
    if is_single_weight_family(family) {
        return false;
    }
    match weight.trim() {
        "bold" | "bolder" => true,
        value => value.parse::<f64>().map(|w| w >= 600.0).unwrap_or(false),
    }
}

/// A `text-transform` carried down through the run flattener so emitted text
/// is already canonicalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "uppercase" => TextTransform::Uppercase,
            "lowercase" => TextTransform::Lowercase,
            "capitalize" => TextTransform::Capitalize,
            _ => TextTransform::None,
        }
    }

    /// Applies the transform to a string the way the browser renders it.
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if c.is_alphanumeric() {
                        if at_word_start {
                            out.extend(c.to_uppercase());
                        } else {
                            out.push(c);
                        }
                        at_word_start = false;
                    } else {
                        out.push(c);
                        at_word_start = true;
                    }
                }
                out
            }
        }
    }
}

/// Line spacing in points, `None` when CSS line-height is `normal`.
pub fn parse_line_spacing(line_height: &str) -> Option<f64> {
    let trimmed = line_height.trim();
    if trimmed == "normal" || trimmed.is_empty() {
        return None;
    }
    let px = parse_px(trimmed);
    if px > 0.0 {
        Some(px * PT_PER_PX)
    } else {
        None
    }
}

/// Normalises a computed `text-align` for the renderer: `start`/`end` become
/// physical `left`/`right`; `justify` passes through uninterpreted.
pub fn normalize_align(text_align: &str) -> Align {
    match text_align.trim() {
        "center" => Align::Center,
        "right" | "end" => Align::Right,
        "justify" => Align::Justify,
        _ => Align::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba_colors() {
        let c = parse_color("rgb(255, 0, 0)").unwrap();
        assert_eq!(c.hex, "FF0000");
        assert_eq!(c.transparency, 0);

        let c = parse_color("rgba(18, 52, 86, 0.5)").unwrap();
        assert_eq!(c.hex, "123456");
        assert_eq!(c.transparency, 50);
    }

    #[test]
    fn transparent_colors_read_as_none() {
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), None);
    }

    #[test]
    fn background_defaults_to_white() {
        let c = background_color_or_white("rgba(0, 0, 0, 0)");
        assert_eq!(c.hex, "FFFFFF");
        assert_eq!(c.transparency, 0);
    }

    #[test]
    fn transparency_is_opacity_complement() {
        let c = parse_color("rgba(0, 0, 0, 0.25)").unwrap();
        assert_eq!(c.transparency, 75);
    }

    #[test]
    fn rotation_from_rotate_function() {
        assert_eq!(parse_rotation("rotate(45deg)", "horizontal-tb"), Some(45.0));
        assert_eq!(parse_rotation("rotate(-90deg)", "horizontal-tb"), Some(270.0));
        assert_eq!(parse_rotation("none", "horizontal-tb"), None);
    }

    #[test]
    fn rotation_from_matrix_decomposition() {
        // rotate(90deg) as a computed matrix
        assert_eq!(
            parse_rotation("matrix(0, 1, -1, 0, 0, 0)", "horizontal-tb"),
            Some(90.0)
        );
        // identity matrix reads as unrotated
        assert_eq!(
            parse_rotation("matrix(1, 0, 0, 1, 10, 20)", "horizontal-tb"),
            None
        );
    }

    #[test]
    fn writing_modes_add_quarter_turns() {
        assert_eq!(parse_rotation("none", "vertical-rl"), Some(90.0));
        assert_eq!(parse_rotation("none", "vertical-lr"), Some(270.0));
        // rotate(270deg) + vertical-rl wraps back to 0
        assert_eq!(parse_rotation("rotate(270deg)", "vertical-rl"), None);
    }

    #[test]
    fn quarter_turn_position_swaps_dimensions() {
        // A 200x100 paragraph rotated 90deg reports a 100x200 rect.
        let rect = PxRect {
            left: 50.0,
            top: 0.0,
            width: 100.0,
            height: 200.0,
        };
        let pos = corrected_position(&rect, 200.0, 100.0, Some(90.0));
        assert!((pos.w - 200.0 / 96.0).abs() < 1e-9);
        assert!((pos.h - 100.0 / 96.0).abs() < 1e-9);
        // centre preserved
        assert!((pos.x + pos.w / 2.0 - 100.0 / 96.0).abs() < 1e-9);
        assert!((pos.y + pos.h / 2.0 - 100.0 / 96.0).abs() < 1e-9);
    }

    #[test]
    fn arbitrary_rotation_uses_offset_dimensions() {
        let rect = PxRect {
            left: 0.0,
            top: 0.0,
            width: 212.0,
            height: 212.0,
        };
        let pos = corrected_position(&rect, 200.0, 100.0, Some(45.0));
        assert!((pos.w - 200.0 / 96.0).abs() < 1e-9);
        assert!((pos.h - 100.0 / 96.0).abs() < 1e-9);
    }

    #[test]
    fn parses_outer_box_shadow() {
        let s = parse_box_shadow("rgba(0, 0, 0, 0.5) 3px 4px 6px 0px").unwrap();
        assert_eq!(s.color, "000000");
        assert!((s.offset - 5.0 * 0.75).abs() < 1e-9);
        assert!((s.blur - 4.5).abs() < 1e-9);
        assert!((s.angle - (4.0f64).atan2(3.0).to_degrees()).abs() < 1e-9);
        assert!((s.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn shadow_opacity_keeps_the_raw_alpha() {
        // 0.335 does not survive a round trip through integer percent, so
        // this catches any rounding between the colour and the shadow.
        let s = parse_box_shadow("rgba(0, 0, 0, 0.335) 1px 1px 2px 0px").unwrap();
        assert!((s.opacity - 0.335).abs() < 1e-9);
    }

    #[test]
    fn inset_shadows_are_dropped() {
        assert_eq!(
            parse_box_shadow("rgba(0, 0, 0, 0.5) 2px 2px 4px 0px inset"),
            None
        );
        assert_eq!(parse_box_shadow("none"), None);
    }

    #[test]
    fn first_family_strips_quotes() {
        assert_eq!(
            first_font_family("\"Helvetica Neue\", Arial, sans-serif"),
            "Helvetica Neue"
        );
        assert_eq!(first_font_family("Impact, fantasy"), "Impact");
    }

    #[test]
    fn impact_suppresses_bold() {
        assert!(!is_bold_weight("900", "Impact"));
        assert!(is_bold_weight("900", "Arial"));
        assert!(is_bold_weight("bold", "Arial"));
        assert!(!is_bold_weight("400", "Arial"));
    }

    #[test]
    fn text_transforms_apply() {
        assert_eq!(TextTransform::Uppercase.apply("abc def"), "ABC DEF");
        assert_eq!(TextTransform::Lowercase.apply("ABC"), "abc");
        assert_eq!(
            TextTransform::Capitalize.apply("hello brave world"),
            "Hello Brave World"
        );
    }

    #[test]
    fn line_spacing_only_when_not_normal() {
        assert_eq!(parse_line_spacing("normal"), None);
        assert_eq!(parse_line_spacing("24px"), Some(18.0));
    }

    #[test]
    fn align_normalisation() {
        assert_eq!(normalize_align("start"), Align::Left);
        assert_eq!(normalize_align("end"), Align::Right);
        assert_eq!(normalize_align("center"), Align::Center);
        assert_eq!(normalize_align("justify"), Align::Justify);
    }
}
