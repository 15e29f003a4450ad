use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            browser::page::Page,
            error::{BookingError, Result}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance for one booking run
///
/// The session owns the browser process. Dropping the session (or any exit
/// path of the embedding caller) tears the browser down; [`close`](Self::close)
/// additionally closes all tabs for an orderly shutdown.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Booking sites tend to run anti-bot checks; strip the automation banner
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // A full login + scroll-discovery run can sit idle between waits far
        // longer than the 30 second default
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| BookingError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| BookingError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| BookingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking document visibility and focus state
    pub fn active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: visible and focused (strongest signal)
        for tab in &tabs {
            if tab_matches(tab, "document.visibilityState === 'visible' && document.hasFocus()") {
                return Ok(tab.clone());
            }
        }

        // Second pass: just visible
        for tab in &tabs {
            if tab_matches(tab, "document.visibilityState === 'visible'") {
                return Ok(tab.clone());
            }
        }

        Err(BookingError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get a [`Page`] handle over the active tab
    pub fn page(&self) -> Result<Page> {
        Ok(Page::new(self.active_tab()?))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser by closing all tabs
    ///
    /// The browser process itself shuts down when the session is dropped;
    /// closing tabs first makes the teardown orderly on failure paths too.
    pub fn close(&self) -> Result<()> {
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}

fn tab_matches(tab: &Arc<Tab>, check_js: &str) -> bool {
    match tab.evaluate(check_js, false) {
        Ok(remote_object) => remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false),
        Err(e) => {
            log::debug!("Failed to check tab status: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(true).window_size(800, 600);

        assert!(opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_active_tab() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let tab = session.active_tab();
        assert!(tab.is_ok());
    }

    #[test]
    #[ignore]
    fn test_page_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let page = session.page().expect("Failed to get page");
        assert!(page.navigate("about:blank").is_ok());
    }
}
