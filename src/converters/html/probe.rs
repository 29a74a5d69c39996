//! Probes the loaded page's body dimensions and scroll extents, and checks
//! them against the overflow tolerance and the builder's slide layout.

use super::constants::{LAYOUT_TOLERANCE_IN, OVERFLOW_TOLERANCE_PX};
use super::units::{px_to_in, px_to_pt};
use crate::builder::SlideLayout;
use crate::errors::Result;
use crate::host::{evaluate_json, PageHost};
use crate::models::dom::BodyProbe;

/// Self-contained script returning the body's laid-out size and the page's
/// scroll extents as JSON.
const PROBE_JS: &str = r#"
(() => {
    const body = document.body;
    const doc = document.documentElement;
    return JSON.stringify({
        width: body.offsetWidth,
        height: body.offsetHeight,
        scrollWidth: Math.max(body.scrollWidth, doc.scrollWidth),
        scrollHeight: Math.max(body.scrollHeight, doc.scrollHeight),
    });
})()
"#;

/// Reads the body dimensions from the page.
pub(crate) fn probe_body(page: &mut dyn PageHost) -> Result<BodyProbe> {
    let value = evaluate_json(page, PROBE_JS)?;
    Ok(serde_json::from_value(value)?)
}

/// Appends overflow and layout-mismatch errors for the probed body.
pub(crate) fn check_dimensions(probe: &BodyProbe, layout: &SlideLayout, errors: &mut Vec<String>) {
    let overflow_x = probe.scroll_width - probe.width;
    if overflow_x > OVERFLOW_TOLERANCE_PX {
        errors.push(format!(
            "Content overflows the body horizontally by {:.1}pt; reduce content width",
            px_to_pt(overflow_x)
        ));
    }
    let overflow_y = probe.scroll_height - probe.height;
    if overflow_y > OVERFLOW_TOLERANCE_PX {
        errors.push(format!(
            "Content overflows the body vertically by {:.1}pt; reduce content height \
             and leave at least 0.5\" of bottom margin",
            px_to_pt(overflow_y)
        ));
    }

    let body_w_in = px_to_in(probe.width);
    let body_h_in = px_to_in(probe.height);
    if (body_w_in - layout.width_in()).abs() > LAYOUT_TOLERANCE_IN
        || (body_h_in - layout.height_in()).abs() > LAYOUT_TOLERANCE_IN
    {
        errors.push(format!(
            "Body size {:.2}\" x {:.2}\" does not match the slide layout {:.2}\" x {:.2}\"",
            body_w_in,
            body_h_in,
            layout.width_in(),
            layout.height_in()
        ));
    }
}
