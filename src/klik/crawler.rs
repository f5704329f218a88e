//! Paginated crawl controller over a single browser session.

use crate::config::Config;
use crate::klik::browser::BrowserSession;
use crate::klik::decoder::Decoder;
use crate::klik::error::ScrapeError;
use crate::klik::models::{Listing, Product, SuperCategory};
use crate::klik::query::{build_listing_url, ListingQuery};
use crate::klik::selectors::{ready, BASE_URL};
use rand::RngExt;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info};

/// Drives one browser session through category and listing pages.
///
/// Each controller owns exactly one session for its lifetime; pages are
/// fetched strictly sequentially because navigation mutates the session
/// state in place. Concurrent crawls require independent controllers.
pub struct Crawler<B: BrowserSession> {
    session: B,
    decoder: Decoder,
    wait_timeout: Duration,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl<B: BrowserSession> Crawler<B> {
    /// Creates a crawler taking ownership of a browser session.
    pub fn new(session: B, config: &Config) -> Self {
        Self {
            session,
            decoder: Decoder::new(),
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        }
    }

    /// Decodes the storefront category tree from the home page.
    pub async fn categories(&self) -> Result<Vec<SuperCategory>, ScrapeError> {
        info!("Fetching category list");

        let document = self.load_page(BASE_URL, ready::HOME).await?;
        self.decoder.decode_categories(&document)
    }

    /// Fetches and decodes a single listing page (no pagination loop).
    pub async fn listing_page(&self, query: &ListingQuery) -> Result<Listing, ScrapeError> {
        let url = build_listing_url(query);
        info!("Fetching {}", url);

        let document = self.load_page(&url, ready::LISTING).await?;

        if let Ok(pages) = self.decoder.decode_page_count(&document) {
            debug!("Number of pages: {}", pages);
        }

        self.decoder.decode_products(&document)
    }

    /// Crawls every page of a category and aggregates the products in page
    /// order, then in-page order. Duplicate PLUs are preserved as-is.
    ///
    /// Any timeout or decode failure aborts the whole crawl; no partial
    /// result is returned.
    pub async fn crawl_category(
        &self,
        category_link: &str,
        template: &ListingQuery,
    ) -> Result<Vec<Product>, ScrapeError> {
        let mut query = template.for_page(1);
        query.category_path = category_link.to_string();

        let url = build_listing_url(&query);
        info!("Fetching {}", url);

        // `Html` is not Send; keep it scoped between suspension points.
        let (page_count, mut products) = {
            let document = self.load_page(&url, ready::LISTING).await?;
            let page_count = self.decoder.decode_page_count(&document)?;
            (page_count, self.decoder.decode_products(&document)?.products)
        };
        info!("Number of pages: {}", page_count);

        for page in 2..=page_count {
            self.delay().await;

            // Presence signal brackets the click; the storefront ignores
            // paging from a session that shows no user activity.
            self.session.key_signal().await?;
            self.session.click(ready::NEXT_PAGE).await?;
            self.session.key_signal().await?;

            self.session.wait_for(ready::LISTING, self.wait_timeout).await?;

            let markup = self.session.page_source().await?;
            let document = Html::parse_document(&markup);
            let page_products = self.decoder.decode_products(&document)?.products;

            debug!("Page {} decoded {} products", page, page_products.len());
            products.extend(page_products);
        }

        Ok(products)
    }

    /// Navigates to `url`, waits for the readiness marker, and parses the
    /// rendered markup.
    async fn load_page(&self, url: &str, readiness: &str) -> Result<Html, ScrapeError> {
        self.session.navigate(url).await?;
        self.session.wait_for(readiness, self.wait_timeout).await?;

        let markup = self.session.page_source().await?;
        Ok(Html::parse_document(&markup))
    }

    /// Human-like pause between page interactions.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        tokio::time::sleep(Duration::from_millis(self.delay_ms + jitter)).await;
    }
}
