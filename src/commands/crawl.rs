//! Full category crawl command implementation.

use crate::commands::{category_token, write_json_file};
use crate::config::Config;
use crate::format::Formatter;
use crate::klik::browser::{BrowserSession, ChromeSession};
use crate::klik::crawler::Crawler;
use crate::klik::query::ListingQuery;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info};

/// Crawls every page of one or more categories.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command against a fresh browser session.
    pub async fn execute(
        &self,
        categories: &[String],
        template: &ListingQuery,
        output: Option<&Path>,
    ) -> Result<String> {
        let session = ChromeSession::launch(self.config.headless)
            .context("Failed to launch browser session")?;

        self.execute_with_session(session, categories, template, output).await
    }

    /// Executes the command with a provided session (for testing).
    ///
    /// One session is reused across categories; a failed category is logged
    /// and the run continues with the next one. The crawl controller itself
    /// never returns a partial per-category result.
    pub async fn execute_with_session(
        &self,
        session: impl BrowserSession,
        categories: &[String],
        template: &ListingQuery,
        output: Option<&Path>,
    ) -> Result<String> {
        let crawler = Crawler::new(session, &self.config);
        let formatter = Formatter::new(self.config.format);

        let mut sections = Vec::new();
        let mut failed = 0usize;

        for category in categories {
            info!("Crawling category {}", category);

            match crawler.crawl_category(category, template).await {
                Ok(products) => {
                    info!("Category {} yielded {} products", category, products.len());

                    if let Some(dir) = output {
                        let file = dir.join(format!("{}.json", category_token(category)));
                        write_json_file(&file, &products)?;
                        sections.push(format!(
                            "Saved {} products from {} to {}",
                            products.len(),
                            category,
                            file.display()
                        ));
                    } else {
                        sections.push(formatter.format_products(&products));
                    }
                }
                Err(e) => {
                    error!("Category {} failed: {}", category, e);
                    failed += 1;
                }
            }
        }

        if failed > 0 && failed == categories.len() {
            anyhow::bail!("All {} categories failed", failed);
        }

        Ok(sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klik::error::ScrapeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Serves one single-page category per navigation; optionally times out
    /// on a chosen navigation.
    struct MockSession {
        pages: Vec<String>,
        navigation: AtomicUsize,
        fail_navigation: Option<usize>,
    }

    impl MockSession {
        fn new(pages: Vec<String>) -> Self {
            Self { pages, navigation: AtomicUsize::new(0), fail_navigation: None }
        }
    }

    #[async_trait]
    impl BrowserSession for MockSession {
        async fn navigate(&self, _url: &str) -> Result<(), ScrapeError> {
            self.navigation.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn page_source(&self) -> Result<String, ScrapeError> {
            let idx = self.navigation.load(Ordering::SeqCst).saturating_sub(1);
            Ok(self.pages[idx.min(self.pages.len() - 1)].clone())
        }

        async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
            let idx = self.navigation.load(Ordering::SeqCst).saturating_sub(1);
            if self.fail_navigation == Some(idx) {
                return Err(ScrapeError::PageLoadTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            Ok(())
        }

        async fn click(&self, _selector: &str) -> Result<(), ScrapeError> {
            Ok(())
        }

        async fn key_signal(&self) -> Result<(), ScrapeError> {
            Ok(())
        }
    }

    fn single_page_category(plu: &str, title: &str) -> String {
        format!(
            r#"<html><body>
            <div class="wrp-produk-list">
                <div class="breadcrumb"><a href="/c/x">Sarapan</a></div>
                <div class="product-collection">
                    <div class="item" data-plu="{plu}">
                        <a href="/product/{plu}"><div class="title">{title}</div></a>
                        <span class="normal">Rp 1.500</span>
                    </div>
                </div>
                <select class="form-control pagelist"><option>1</option></select>
            </div>
            </body></html>"#
        )
    }

    fn make_test_config() -> Config {
        Config { delay_ms: 0, delay_jitter_ms: 0, ..Config::default() }
    }

    #[tokio::test]
    async fn test_crawl_command_multiple_categories() {
        let session = MockSession::new(vec![
            single_page_category("1", "Energen Vanilla"),
            single_page_category("2", "Sereal Coklat"),
        ]);
        let cmd = CrawlCommand::new(make_test_config());
        let template = ListingQuery::new("");

        let output = cmd
            .execute_with_session(
                session,
                &["/category/sarapan".to_string(), "/category/sereal".to_string()],
                &template,
                None,
            )
            .await
            .unwrap();

        assert!(output.contains("Energen Vanilla"));
        assert!(output.contains("Sereal Coklat"));
    }

    #[tokio::test]
    async fn test_crawl_command_continues_after_failed_category() {
        let mut session = MockSession::new(vec![
            single_page_category("1", "Energen Vanilla"),
            single_page_category("2", "Sereal Coklat"),
        ]);
        session.fail_navigation = Some(0);

        let cmd = CrawlCommand::new(make_test_config());
        let template = ListingQuery::new("");

        let output = cmd
            .execute_with_session(
                session,
                &["/category/sarapan".to_string(), "/category/sereal".to_string()],
                &template,
                None,
            )
            .await
            .unwrap();

        // First category timed out and was skipped; second still crawled
        assert!(!output.contains("Energen Vanilla"));
        assert!(output.contains("Sereal Coklat"));
    }

    #[tokio::test]
    async fn test_crawl_command_all_failed_is_an_error() {
        let mut session = MockSession::new(vec![single_page_category("1", "Energen Vanilla")]);
        session.fail_navigation = Some(0);

        let cmd = CrawlCommand::new(make_test_config());
        let template = ListingQuery::new("");

        let result = cmd
            .execute_with_session(session, &["/category/sarapan".to_string()], &template, None)
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All 1 categories failed"));
    }

    #[tokio::test]
    async fn test_crawl_command_writes_one_file_per_category() {
        let dir = TempDir::new().unwrap();
        let session = MockSession::new(vec![
            single_page_category("1", "Energen Vanilla"),
            single_page_category("2", "Sereal Coklat"),
        ]);
        let cmd = CrawlCommand::new(make_test_config());
        let template = ListingQuery::new("");

        cmd.execute_with_session(
            session,
            &["/category/sarapan".to_string(), "/category/sereal".to_string()],
            &template,
            Some(dir.path()),
        )
        .await
        .unwrap();

        assert!(dir.path().join("sarapan.json").exists());
        assert!(dir.path().join("sereal.json").exists());

        let content = std::fs::read_to_string(dir.path().join("sereal.json")).unwrap();
        assert!(content.contains("Sereal Coklat"));
    }
}
