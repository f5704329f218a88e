//! Single-page product listing command implementation.

use crate::commands::{category_token, write_json_file};
use crate::config::Config;
use crate::format::Formatter;
use crate::klik::browser::{BrowserSession, ChromeSession};
use crate::klik::crawler::Crawler;
use crate::klik::query::ListingQuery;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Fetches one listing page of a category.
pub struct ProductsCommand {
    config: Config,
}

impl ProductsCommand {
    /// Creates a new products command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command against a fresh browser session.
    pub async fn execute(&self, query: &ListingQuery, output: Option<&Path>) -> Result<String> {
        let session = ChromeSession::launch(self.config.headless)
            .context("Failed to launch browser session")?;

        self.execute_with_session(session, query, output).await
    }

    /// Executes the command with a provided session (for testing).
    pub async fn execute_with_session(
        &self,
        session: impl BrowserSession,
        query: &ListingQuery,
        output: Option<&Path>,
    ) -> Result<String> {
        let crawler = Crawler::new(session, &self.config);
        let listing = crawler.listing_page(query).await?;

        info!("Page {} of {} listed {} products", query.page, listing.category, listing.count());

        if let Some(dir) = output {
            let file =
                dir.join(format!("{}{}.json", category_token(&query.category_path), query.page));
            write_json_file(&file, &listing.products)?;
            return Ok(format!("Saved {} products to {}", listing.count(), file.display()));
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&listing.products))
    }
}
