//! A [`PageHost`] implementation over a locally-launched headless Chrome,
//! available behind the `chrome` cargo feature. The rest of the crate never
//! names the browser; this module is the only place that does.

use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;

use crate::builder::SlideBuilder;
use crate::converters::html::{self, TranslateOptions, Translated};
use crate::errors::{Result, TranslateError};
use crate::host::PageHost;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// One headless Chrome tab driven through the translation pipeline. The
/// browser process is owned by the value and shut down when it drops, on
/// every exit path.
pub struct ChromeHost {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeHost {
    /// Launches a headless browser with a fresh tab.
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(host_error)?;
        let browser = Browser::new(options).map_err(host_error)?;
        let tab = browser.new_tab().map_err(host_error)?;
        Ok(ChromeHost {
            _browser: browser,
            tab,
        })
    }
}

impl PageHost for ChromeHost {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(host_error)?;
        self.tab.wait_until_navigated().map_err(host_error)?;
        Ok(())
    }

    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(f64::from(width)),
                height: Some(f64::from(height)),
            })
            .map_err(host_error)?;
        Ok(())
    }

    fn evaluate(&mut self, script: &str) -> Result<Value> {
        let result = self.tab.evaluate(script, false).map_err(host_error)?;
        Ok(result.value.unwrap_or(Value::Null))
    }

    fn wait_for(&mut self, expression: &str) -> Result<()> {
        let deadline = Instant::now() + WAIT_TIMEOUT;
        loop {
            let value = self.evaluate(expression)?;
            if value.as_bool().unwrap_or(false) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(TranslateError::Host(format!(
                    "Timed out waiting for expression to become true: {}",
                    expression
                )));
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    fn screenshot_element(&mut self, selector: &str, omit_background: bool) -> Result<Vec<u8>> {
        // Element screenshots composite against the page backdrop, which is
        // white unless painted; an offscreen transparent capture needs the
        // backdrop suppressed for the duration of the shot.
        if omit_background {
            self.evaluate(
                "(() => { document.documentElement.style.background = 'transparent'; \
                 return true; })()",
            )?;
        }
        let element = self.tab.find_element(selector).map_err(host_error)?;
        element
            .capture_screenshot(CaptureScreenshotFormatOption::Png)
            .map_err(host_error)
    }
}

fn host_error(error: impl std::fmt::Display) -> TranslateError {
    TranslateError::Host(error.to_string())
}

/// Convenience entry point: launches a browser, translates the file, and
/// releases the browser on all paths.
pub fn translate_file(
    html_file: &std::path::Path,
    builder: &mut dyn SlideBuilder,
    options: &TranslateOptions,
) -> Result<Translated> {
    let mut host = ChromeHost::launch()?;
    html::translate(&mut host, html_file, builder, options)
}
