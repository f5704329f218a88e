//! HTML decoders for KlikIndomaret category and listing pages.

use crate::klik::currency::rupiah_to_minor;
use crate::klik::error::ScrapeError;
use crate::klik::models::{Category, Listing, Product, SuperCategory};
use crate::klik::selectors::{category, listing, BASE_URL};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Decoder for rendered KlikIndomaret pages.
pub struct Decoder {
    base_url: String,
}

impl Decoder {
    /// Creates a decoder resolving product links against the site origin.
    pub fn new() -> Self {
        Self { base_url: BASE_URL.to_string() }
    }

    /// Creates a decoder resolving product links against a custom origin
    /// (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Decodes the two-level category hierarchy from a rendered home page.
    ///
    /// All-or-nothing: a missing navigation container or sub-menu fails the
    /// whole decode, there is no partial-tree recovery.
    pub fn decode_categories(&self, document: &Html) -> Result<Vec<SuperCategory>, ScrapeError> {
        let nav = document
            .select(&category::NAV)
            .next()
            .ok_or(ScrapeError::StructureMismatch { context: "category navigation container" })?;

        let mut result = Vec::new();

        for group in nav.select(&category::GROUP) {
            let name = group
                .select(&category::LABEL)
                .next()
                .and_then(|label| label.text().find(|chunk| !chunk.trim().is_empty()))
                .map(collapse_whitespace)
                .ok_or(ScrapeError::StructureMismatch { context: "super-category label" })?;

            let submenu = group
                .select(&category::SUBMENU)
                .next()
                .ok_or(ScrapeError::StructureMismatch { context: "super-category sub-menu" })?;

            let mut categories = Vec::new();
            for node in
                child_elements(submenu, "li").filter(|li| li.value().attr("class").is_none())
            {
                categories.push(self.decode_category(node)?);
            }

            trace!("Decoded super-category {} ({} categories)", name, categories.len());
            result.push(SuperCategory { name, categories });
        }

        debug!("Decoded {} super-categories", result.len());
        Ok(result)
    }

    /// Decodes a single category node below a super-category.
    fn decode_category(&self, node: ElementRef) -> Result<Category, ScrapeError> {
        let label = child_elements(node, "span")
            .find(|span| has_class(span, "clickMenu"))
            .ok_or(ScrapeError::StructureMismatch { context: "category label" })?;

        let name = collapse_whitespace(&label.text().collect::<String>());

        // A label whose first content node is itself an element marks a
        // leaf category; plain text marks a branch with its own sub-menu.
        let leaf = label.children().next().is_some_and(|child| child.value().is_element());

        if leaf {
            let link = label
                .select(&category::ANCHOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or(ScrapeError::StructureMismatch { context: "leaf category link" })?;

            return Ok(Category { name, link: link.to_string(), subcategories: None });
        }

        let link = node
            .select(&category::SEE_ALL)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ScrapeError::StructureMismatch { context: "category \"see all\" link" })?;

        let submenu = child_elements(node, "ul")
            .find(|ul| has_class(ul, "nd-kategori"))
            .ok_or(ScrapeError::StructureMismatch { context: "category sub-menu" })?;

        let subcategories = submenu
            .select(&category::SUBCATEGORY)
            .map(|a| collapse_whitespace(&a.text().collect::<String>()))
            .collect();

        Ok(Category { name, link: link.to_string(), subcategories: Some(subcategories) })
    }

    /// Decodes one listing page into its breadcrumb category and products.
    ///
    /// A malformed item invalidates the whole page; partial catalogs are
    /// worse than a visible failure for downstream pricing decisions.
    pub fn decode_products(&self, document: &Html) -> Result<Listing, ScrapeError> {
        let grid = document
            .select(&listing::GRID)
            .next()
            .ok_or(ScrapeError::StructureMismatch { context: "product grid" })?;

        let category = document
            .select(&listing::BREADCRUMB)
            .last()
            .map(|a| collapse_whitespace(&a.text().collect::<String>()))
            .ok_or(ScrapeError::StructureMismatch { context: "breadcrumb" })?;

        let mut products = Vec::new();
        for item in child_elements(grid, "div").filter(|div| has_class(div, "item")) {
            products.push(self.decode_item(item, &category)?);
        }

        debug!("Decoded {} products in {}", products.len(), category);
        Ok(Listing { category, products })
    }

    /// Decodes a single product grid item.
    fn decode_item(&self, item: ElementRef, category: &str) -> Result<Product, ScrapeError> {
        let plu = item
            .value()
            .attr(listing::PLU_ATTR)
            .ok_or(ScrapeError::StructureMismatch { context: "product PLU attribute" })?;

        let href = item
            .select(&listing::LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ScrapeError::StructureMismatch { context: "product link" })?;

        let title = item
            .select(&listing::TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .ok_or(ScrapeError::StructureMismatch { context: "product title" })?;

        let price_text = item
            .select(&listing::PRICE_NORMAL)
            .next()
            .map(|p| p.text().collect::<String>())
            .ok_or(ScrapeError::StructureMismatch { context: "product price" })?;
        let price = rupiah_to_minor(price_text.trim())?;

        // The strikeout node leads with a label element; the trailing text
        // segment holds the actual old price.
        let old_price = item
            .select(&listing::PRICE_STRIKEOUT)
            .next()
            .and_then(|s| s.text().last())
            .map(|text| rupiah_to_minor(text.trim()))
            .transpose()?;

        let discount = item
            .select(&listing::DISCOUNT_BADGE)
            .next()
            .map(|d| d.text().collect::<String>().trim().to_string());

        let is_flash_sale = item.select(&listing::FLASH_SALE).next().is_some();

        Ok(Product {
            plu: plu.to_string(),
            link: format!("{}{}", self.base_url, href),
            title,
            category: category.to_string(),
            price,
            old_price,
            is_discount: discount.is_some(),
            discount,
            is_flash_sale,
        })
    }

    /// Reads the total page count from the page-size selector control.
    pub fn decode_page_count(&self, document: &Html) -> Result<usize, ScrapeError> {
        let select = document
            .select(&listing::PAGE_SELECT)
            .next()
            .ok_or(ScrapeError::StructureMismatch { context: "page-size selector" })?;

        Ok(child_elements(select, "option").count())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct element children with the given tag name (non-recursive).
fn child_elements<'a>(
    node: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    node.children().filter_map(ElementRef::wrap).filter(move |el| el.value().name() == tag)
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
