//! Listing URL construction for category queries.

use crate::klik::selectors::{BASE_HOST, BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort orders understood by the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Promo,
    Popular,
    Newest,
    AlphaAsc,
    AlphaDesc,
    PriceAsc,
    PriceDesc,
}

impl SortBy {
    /// Token the site expects in the `sortcol` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Promo => "PROMO",
            SortBy::Popular => "populer",
            SortBy::Newest => "terbaru",
            SortBy::AlphaAsc => "alfabet(a-z)",
            SortBy::AlphaDesc => "alfabet(z-a)",
            SortBy::PriceAsc => "harga terendah",
            SortBy::PriceDesc => "harga tertinggi",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promo" => Ok(SortBy::Promo),
            "popular" => Ok(SortBy::Popular),
            "newest" => Ok(SortBy::Newest),
            "alpha-asc" => Ok(SortBy::AlphaAsc),
            "alpha-desc" => Ok(SortBy::AlphaDesc),
            "price-asc" => Ok(SortBy::PriceAsc),
            "price-desc" => Ok(SortBy::PriceDesc),
            _ => Err(format!(
                "Unknown sort order: {}. Use: promo, popular, newest, alpha-asc, alpha-desc, price-asc, price-desc",
                s
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Promo => write!(f, "promo"),
            SortBy::Popular => write!(f, "popular"),
            SortBy::Newest => write!(f, "newest"),
            SortBy::AlphaAsc => write!(f, "alpha-asc"),
            SortBy::AlphaDesc => write!(f, "alpha-desc"),
            SortBy::PriceAsc => write!(f, "price-asc"),
            SortBy::PriceDesc => write!(f, "price-desc"),
        }
    }
}

/// Product providers selectable through the `ShowItem` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Toko Indomaret
    Store,
    /// Warehouse Jakarta 1
    Warehouse,
}

impl Provider {
    /// Token the site expects in the `ShowItem` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Provider::Store => "TI",
            Provider::Warehouse => "26",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "store" => Ok(Provider::Store),
            "warehouse" => Ok(Provider::Warehouse),
            _ => Err(format!("Unknown provider: {}. Use: store, warehouse", s)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Store => write!(f, "store"),
            Provider::Warehouse => write!(f, "warehouse"),
        }
    }
}

/// Parameters of one listing-page request.
///
/// Constructed by the caller and consumed to build one URL; the builder
/// performs no bounds validation on `page` or `page_size`, the listing site
/// is the authority on valid ranges.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    /// Whole or part of the category page URL
    pub category_path: String,
    /// Page number, 1-based
    pub page: u32,
    /// Products requested per page
    pub page_size: u32,
    /// Sort order
    pub sort_by: SortBy,
    /// Optional brand filter
    pub brand_id: Option<String>,
    /// Optional inclusive price range in Rupiah
    pub price_range: Option<(u64, u64)>,
    /// Optional raw attribute filter
    pub attributes: Option<String>,
    /// Optional provider filter
    pub provider: Option<Provider>,
}

impl ListingQuery {
    /// Creates a query for page 1 of a category with default settings.
    pub fn new(category_path: impl Into<String>) -> Self {
        Self {
            category_path: category_path.into(),
            page: 1,
            page_size: 54,
            sort_by: SortBy::default(),
            brand_id: None,
            price_range: None,
            attributes: None,
            provider: None,
        }
    }

    /// Returns the same query pointed at a different page.
    pub fn for_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }
}

/// Builds the fully-qualified listing URL for a query.
///
/// The category path is normalized to an absolute URL under the site
/// origin, and the query parameters are appended in the fixed order the
/// endpoint expects. Absent optional parameters are serialized as empty
/// strings rather than omitted.
pub fn build_listing_url(query: &ListingQuery) -> String {
    let mut link = query.category_path.clone();

    if !link.contains(BASE_HOST) {
        if !link.starts_with('/') {
            link.insert(0, '/');
        }
        link = format!("{}{}", BASE_URL, link);
    }
    if link.ends_with('/') {
        link.pop();
    }

    let category = link.rsplit('/').next().unwrap_or_default().to_string();

    let (start_price, end_price) = match query.price_range {
        Some((min, max)) => (min.to_string(), max.to_string()),
        None => (String::new(), String::new()),
    };

    format!(
        "{link}?categories={category}&productbrandid={brand}&sortcol={sort}&pageSize={size}&page={page}&startprice={start_price}&endprice={end_price}&attributes={attributes}&ShowItem={provider}",
        brand = query.brand_id.as_deref().unwrap_or(""),
        sort = query.sort_by.as_param(),
        size = query.page_size,
        page = query.page,
        attributes = query.attributes.as_deref().unwrap_or(""),
        provider = query.provider.map(|p| p.as_param()).unwrap_or(""),
    )
}
