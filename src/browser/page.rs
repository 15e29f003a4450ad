use crate::error::{BookingError, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Element, Tab};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};

/// Capability set over one rendered document
///
/// Everything the slot locator and the booking state machine need from the
/// browser goes through this handle: querying and waiting for elements,
/// clicking, scrolling, and evaluating scripts in the page. Element
/// references obtained here are transient — the schedule list is virtualized
/// and destroys/recreates nodes as it scrolls, so callers must re-resolve
/// after every scroll or navigation instead of caching.
pub struct Page {
    tab: Arc<Tab>,
}

impl Page {
    /// Wrap a tab in a page handle
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// Get the underlying tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Navigate to a URL and wait for the navigation to complete
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BookingError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BookingError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Wait for an element matching a CSS selector to appear, with a bounded timeout
    pub fn wait_for_css(&self, selector: &str, timeout: Duration) -> Result<Element<'_>> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| BookingError::Timeout { what: format!("element '{}'", selector) })
    }

    /// Wait for an element matching an XPath expression to appear, with a bounded timeout
    pub fn wait_for_xpath(&self, selector: &str, timeout: Duration) -> Result<Element<'_>> {
        self.tab
            .wait_for_xpath_with_custom_timeout(selector, timeout)
            .map_err(|_| BookingError::Timeout { what: format!("element '{}'", selector) })
    }

    /// Find all elements currently matching a CSS selector, in document order
    ///
    /// An empty match is not an error; it returns an empty vector.
    pub fn find_all_css(&self, selector: &str) -> Vec<Element<'_>> {
        self.tab.find_elements(selector).unwrap_or_default()
    }

    /// Find all elements currently matching an XPath expression, in document order
    pub fn find_all_xpath(&self, selector: &str) -> Vec<Element<'_>> {
        self.tab.find_elements_by_xpath(selector).unwrap_or_default()
    }

    /// Scroll the document by the given deltas
    pub fn scroll_by(&self, dx: f64, dy: f64) -> Result<()> {
        let js = format!("window.scrollBy({}, {});", dx, dy);
        self.tab
            .evaluate(&js, false)
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to scroll: {}", e)))?;
        Ok(())
    }

    /// Evaluate a script that returns `JSON.stringify(...)` and parse the result
    ///
    /// The script must produce a JSON string as its completion value; reading
    /// many element positions in one round-trip is much cheaper than querying
    /// them one by one over the protocol.
    pub fn evaluate_json<T: DeserializeOwned>(&self, js: &str) -> Result<T> {
        let result = self
            .tab
            .evaluate(js, false)
            .map_err(|e| BookingError::SnapshotFailed(format!("Failed to execute page script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| BookingError::SnapshotFailed("No value returned from page script".to_string()))?;

        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| BookingError::SnapshotFailed(format!("Failed to get JSON string: {}", e)))?;

        serde_json::from_str(&json_str)
            .map_err(|e| BookingError::SnapshotFailed(format!("Failed to parse page JSON: {}", e)))
    }

    /// Capture a PNG screenshot of the current viewport
    pub fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to capture screenshot: {}", e)))
    }

    /// Get the full HTML of the current document
    pub fn html(&self) -> Result<String> {
        let js = "JSON.stringify(document.documentElement.outerHTML)";
        self.evaluate_json(js)
    }

    /// Block for a fixed settle duration
    ///
    /// The schedule list emits no event when lazily-rendered content arrives,
    /// so waits after scroll/click are fixed-cadence rather than event-driven.
    pub fn settle(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
