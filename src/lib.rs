//! klik-crawler - KlikIndomaret catalog crawler CLI
//!
//! Drives a headless Chromium session through the storefront's category and
//! listing pages and decodes the rendered HTML into structured catalog data.

pub mod commands;
pub mod config;
pub mod format;
pub mod klik;

pub use config::Config;
pub use klik::browser::{BrowserSession, ChromeSession};
pub use klik::crawler::Crawler;
pub use klik::decoder::Decoder;
pub use klik::error::ScrapeError;
pub use klik::models::{Category, Listing, Product, SuperCategory};
pub use klik::query::{build_listing_url, ListingQuery, Provider, SortBy};
