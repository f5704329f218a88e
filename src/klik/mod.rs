//! KlikIndomaret-specific modules for the browser session, page decoding,
//! and data models.

pub mod browser;
pub mod crawler;
pub mod currency;
pub mod decoder;
pub mod error;
pub mod models;
pub mod query;
pub mod selectors;

pub use browser::{BrowserSession, ChromeSession};
pub use crawler::Crawler;
pub use decoder::Decoder;
pub use error::ScrapeError;
pub use models::{Category, Listing, Product, SuperCategory};
pub use query::{build_listing_url, ListingQuery, Provider, SortBy};
