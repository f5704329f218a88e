//! Category listing command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::klik::browser::{BrowserSession, ChromeSession};
use crate::klik::crawler::Crawler;
use anyhow::{Context, Result};

/// Fetches and renders the storefront category tree.
pub struct CategoriesCommand {
    config: Config,
}

impl CategoriesCommand {
    /// Creates a new categories command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command against a fresh browser session.
    pub async fn execute(&self) -> Result<String> {
        let session = ChromeSession::launch(self.config.headless)
            .context("Failed to launch browser session")?;

        self.execute_with_session(session).await
    }

    /// Executes the command with a provided session (for testing).
    pub async fn execute_with_session(&self, session: impl BrowserSession) -> Result<String> {
        let crawler = Crawler::new(session, &self.config);
        let categories = crawler.categories().await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_categories(&categories))
    }
}
