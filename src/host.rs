use serde_json::Value;

use crate::errors::Result;

/// The headless-browser seam. The engine treats the browser as a host that
/// can load HTML, evaluate a script against the laid-out page, and
/// screenshot an element subtree; everything else is out of scope.
///
/// The engine drives one page through a strictly sequential pipeline, so the
/// trait is `&mut self` throughout and implementations need no internal
/// synchronisation. Failures map to [`crate::TranslateError::Host`] and
/// surface immediately.
pub trait PageHost {
    /// Loads the given URL and waits for the document to finish loading.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Resizes the viewport to the given CSS-pixel dimensions.
    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()>;

    /// Evaluates a script in the page and returns its completion value.
    /// Scripts that need to return structures serialize them with
    /// `JSON.stringify`, so the value may arrive as a JSON-encoded string.
    fn evaluate(&mut self, script: &str) -> Result<Value>;

    /// Polls the given expression until it evaluates truthy. Used to wait
    /// for injected images to finish loading before screenshotting.
    fn wait_for(&mut self, expression: &str) -> Result<()>;

    /// Screenshots the element matched by `selector` (that element only, not
    /// a clipped viewport) and returns PNG bytes. With `omit_background` the
    /// page's default white backdrop is suppressed so transparent regions
    /// stay transparent.
    fn screenshot_element(&mut self, selector: &str, omit_background: bool) -> Result<Vec<u8>>;
}

/// Evaluates a script that returns `JSON.stringify(...)` output and decodes
/// it. Hosts that return structured values directly are handled too.
pub(crate) fn evaluate_json(page: &mut dyn PageHost, script: &str) -> Result<Value> {
    let value = page.evaluate(script)?;
    match value {
        Value::String(s) => Ok(serde_json::from_str(&s)?),
        other => Ok(other),
    }
}
