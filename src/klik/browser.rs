//! Browser session capability over headless Chromium.

use crate::klik::error::ScrapeError;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One stateful browser session - enables mocking for tests.
///
/// Navigation mutates the session in place, so a session must never be
/// shared between concurrent crawls; give each crawl its own instance.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigates the session to the given URL.
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    /// Returns the currently rendered markup.
    async fn page_source(&self) -> Result<String, ScrapeError>;

    /// Waits until an element matching `selector` is present, failing with
    /// [`ScrapeError::PageLoadTimeout`] when the bounded wait expires.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// Finds the element matching `selector` and activates it.
    async fn click(&self, selector: &str) -> Result<(), ScrapeError>;

    /// Sends a user-presence key signal (space) to the page.
    async fn key_signal(&self) -> Result<(), ScrapeError>;
}

/// Live session driving a headless Chromium tab over the DevTools protocol.
pub struct ChromeSession {
    // Keeps the browser process alive for the lifetime of the tab.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launches a Chromium instance and opens a fresh tab.
    pub fn launch(headless: bool) -> Result<Self, ScrapeError> {
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .build()
            .map_err(session_error)?;

        let browser = Browser::new(options).map_err(session_error)?;
        let tab = browser.new_tab().map_err(session_error)?;

        Ok(Self { _browser: browser, tab })
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        debug!("Navigating to {}", url);
        self.tab.navigate_to(url).map_err(session_error)?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        self.tab.get_content().map_err(session_error)
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.tab.wait_for_element_with_custom_timeout(selector, timeout).map_err(|_| {
            ScrapeError::PageLoadTimeout { selector: selector.to_string(), timeout }
        })?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), ScrapeError> {
        let element = self.tab.find_element(selector).map_err(session_error)?;
        element.click().map_err(session_error)?;
        Ok(())
    }

    async fn key_signal(&self) -> Result<(), ScrapeError> {
        self.tab.press_key("Space").map_err(session_error)?;
        Ok(())
    }
}

fn session_error(err: impl ToString) -> ScrapeError {
    ScrapeError::Session { message: err.to_string() }
}
