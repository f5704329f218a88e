//! CSS selectors for KlikIndomaret HTML decoding.
//!
//! This file contains all selectors used for decoding KlikIndomaret pages.
//! Update this file when the storefront changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Site origin every relative product link is resolved against.
pub const BASE_URL: &str = "https://www.klikindomaret.com";

/// Bare host, used to detect category links that already carry the site host.
pub const BASE_HOST: &str = "www.klikindomaret.com";

/// Selectors for the home-page category navigation.
pub mod category {
    use super::*;

    /// Top-level category navigation container.
    pub static NAV: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("ul#headerMobileChannel").unwrap());

    /// Super-category group nodes. Entries declaring a `data-name`
    /// attribute belong to a different menu kind and are excluded.
    pub static GROUP: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.kategori:not([data-name])").unwrap());

    /// Label container used by both group headers and category entries.
    pub static LABEL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.clickMenu").unwrap());

    /// Sub-menu holding a super-category's direct category nodes.
    pub static SUBMENU: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("ul.wrp-submenu.st-kategori").unwrap());

    /// "See all" anchor carrying a branch category's canonical link.
    pub static SEE_ALL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.menu-seeall a").unwrap());

    /// Anchor inside a leaf category's label.
    pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Genuine sub-category anchors, identified by the click-tracking
    /// signature the site attaches to them; promotional anchors lack it.
    pub static SUBCATEGORY: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(r#"a[onclick="clickTrackerCATS(this,'', 0, 'Kategori', false)"]"#).unwrap()
    });
}

/// Selectors for product listing pages.
pub mod listing {
    use super::*;

    /// Product grid container.
    pub static GRID: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.product-collection").unwrap());

    /// PLU identifier attribute on a grid item.
    pub static PLU_ATTR: &str = "data-plu";

    /// Breadcrumb anchors; the last one names the current category.
    pub static BREADCRUMB: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.breadcrumb a").unwrap());

    /// Product page anchor inside a grid item.
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Product title.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.title").unwrap());

    /// Current price.
    pub static PRICE_NORMAL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.normal").unwrap());

    /// Strikeout price shown next to a discounted price.
    pub static PRICE_STRIKEOUT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.strikeout").unwrap());

    /// Discount percentage badge.
    pub static DISCOUNT_BADGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.discount").unwrap());

    /// Flash-sale marker.
    pub static FLASH_SALE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.flash-product").unwrap());

    /// Page-size selector control; its options enumerate the pages.
    pub static PAGE_SELECT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("select.form-control.pagelist").unwrap());
}

/// Readiness markers and navigation controls handed to the browser driver.
pub mod ready {
    /// Product listing widget has rendered.
    pub const LISTING: &str = ".wrp-produk-list";

    /// Home-page brand/category widget has rendered.
    pub const HOME: &str = ".brand";

    /// "Next page" control of the pagination bar.
    pub const NEXT_PAGE: &str = ".next";
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*category::NAV;
        let _ = &*category::GROUP;
        let _ = &*category::SUBMENU;
        let _ = &*category::SEE_ALL;
        let _ = &*category::SUBCATEGORY;
        let _ = &*listing::GRID;
        let _ = &*listing::BREADCRUMB;
        let _ = &*listing::PAGE_SELECT;
    }

    #[test]
    fn test_group_selector_excludes_named_menus() {
        let html = Html::parse_document(
            r#"<ul id="headerMobileChannel">
                <li class="kategori">Catalog</li>
                <li class="kategori" data-name="food">Other menu</li>
            </ul>"#,
        );

        let groups: Vec<_> = html.select(&category::GROUP).collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text().collect::<String>(), "Catalog");
    }

    #[test]
    fn test_subcategory_selector_requires_tracking_signature() {
        let html = Html::parse_document(
            r#"<ul class="nd-kategori">
                <li><a onclick="clickTrackerCATS(this,'', 0, 'Kategori', false)" href="/a">Real</a></li>
                <li><a href="/promo">Promo</a></li>
            </ul>"#,
        );

        let anchors: Vec<_> = html.select(&category::SUBCATEGORY).collect();
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].text().collect::<String>(), "Real");
    }
}
