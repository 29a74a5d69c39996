//! Aggregates content-rule, geometry, and resource errors so the engine can
//! report every violation at once instead of failing piecemeal.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::{BOTTOM_GUARD_IN, BOTTOM_GUARD_MIN_PT, PX_PER_IN};
use crate::models::background::Background;
use crate::models::dom::BodyProbe;
use crate::models::elements::SlideElement;
use crate::models::SlideDescription;

static CSS_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*["']?([^"')]+)["']?\s*\)"#).unwrap());

/// Checks that every locally-referenced image file exists. Runs before
/// rasterization, while records still carry the paths the HTML named.
pub(crate) fn check_files(
    description: &SlideDescription,
    html_dir: &Path,
    errors: &mut Vec<String>,
) {
    let mut check = |src: &str| {
        if let Some(path) = resolve_local_path(src, html_dir) {
            if !path.exists() {
                errors.push(format!("Image file not found: {}", path.display()));
            }
        }
    };

    match &description.background {
        Background::Css { style } => {
            for url in css_urls(&style.background_image) {
                check(&url);
            }
        }
        Background::Gradient { .. } | Background::Color { .. } | Background::Image { .. } => {}
    }

    for element in &description.elements {
        match element {
            SlideElement::Image(image) => check(&image.src),
            SlideElement::BgImage(bg) => {
                for url in css_urls(&bg.style.background_image) {
                    check(&url);
                }
            }
            _ => {}
        }
    }
}

/// Flags text that sits too close to the slide bottom to render reliably.
pub(crate) fn check_text_bottom(
    description: &SlideDescription,
    probe: &BodyProbe,
    errors: &mut Vec<String>,
) {
    let slide_height_in = probe.height / PX_PER_IN;
    for element in &description.elements {
        let (position, font_size, label) = match element {
            SlideElement::Text(text) => (&text.position, text.style.font_size, "Text element"),
            SlideElement::List(list) => (&list.position, list.style.font_size, "List"),
            _ => continue,
        };
        if font_size > BOTTOM_GUARD_MIN_PT
            && slide_height_in - (position.y + position.h) < BOTTOM_GUARD_IN
        {
            errors.push(format!(
                "{} at {:.2}\" ends within 0.5\" of the slide bottom; move it up",
                label, position.y
            ));
        }
    }
}

/// Formats the accumulated errors per the failure contract: the sole
/// violation on its own, or a numbered aggregate.
pub(crate) fn format_errors(errors: &[String]) -> String {
    if errors.len() == 1 {
        return errors[0].clone();
    }
    let mut message = String::from("Multiple validation errors found:");
    for (i, error) in errors.iter().enumerate() {
        message.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    message
}

/// Resolves an image reference to a local filesystem path. Remote and data
/// URLs return `None` (nothing to check); `file://` is stripped; relative
/// paths resolve against the HTML file's directory.
fn resolve_local_path(src: &str, html_dir: &Path) -> Option<PathBuf> {
    let src = src.trim();
    if src.is_empty()
        || src.starts_with("http://")
        || src.starts_with("https://")
        || src.starts_with("data:")
    {
        return None;
    }
    let stripped = src.strip_prefix("file://").unwrap_or(src);
    let path = Path::new(stripped);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(html_dir.join(path))
    }
}

fn css_urls(background_image: &str) -> Vec<String> {
    CSS_URL_RE
        .captures_iter(background_image)
        .map(|c| c[1].to_string())
        .collect()
}
