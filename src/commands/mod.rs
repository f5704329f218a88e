//! CLI command implementations.

pub mod categories;
pub mod crawl;
pub mod products;

pub use categories::CategoriesCommand;
pub use crawl::CrawlCommand;
pub use products::ProductsCommand;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Final path segment of a category link, used to name output files.
pub fn category_token(link: &str) -> &str {
    link.trim_end_matches('/').rsplit('/').next().unwrap_or(link)
}
