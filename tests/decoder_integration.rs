//! Integration tests for the page decoders using fixture files.

use klik_crawler::klik::decoder::Decoder;
use klik_crawler::klik::error::ScrapeError;
use scraper::Html;

const CATEGORY_FIXTURE: &str = include_str!("fixtures/category_page.html");
const LISTING_FIXTURE_1: &str = include_str!("fixtures/listing_page_1.html");
const LISTING_FIXTURE_2: &str = include_str!("fixtures/listing_page_2.html");

#[test]
fn test_decode_category_tree() {
    let decoder = Decoder::new();
    let document = Html::parse_document(CATEGORY_FIXTURE);

    let supers = decoder.decode_categories(&document).unwrap();

    // The "Pilih Toko" menu declares data-name and is a different menu kind
    assert_eq!(supers.len(), 2);
    assert_eq!(supers[0].name, "Kebutuhan Dapur");
    assert_eq!(supers[1].name, "Promo");

    // Branches carry the "see all" link and the tracked sub-category names
    let dapur = &supers[0].categories;
    assert_eq!(dapur.len(), 2);

    let bumbu = &dapur[0];
    assert_eq!(bumbu.name, "Bumbu Masakan");
    assert_eq!(bumbu.link, "/category/bumbu-masakan");
    assert_eq!(
        bumbu.subcategories.as_deref().unwrap(),
        ["Bumbu Instan".to_string(), "Kecap & Saus".to_string()]
    );

    let minyak = &dapur[1];
    assert_eq!(minyak.name, "Minyak Goreng");
    assert_eq!(minyak.subcategories.as_deref().unwrap(), ["Minyak Kelapa".to_string()]);

    // Leaves take the anchor link and omit the subcategories field
    let promo = &supers[1].categories;
    assert_eq!(promo.len(), 2);
    assert!(promo.iter().all(|c| c.is_leaf()));
    assert_eq!(promo[0].name, "Promo Gajian");
    assert_eq!(promo[0].link, "/page/promogajian");
    assert_eq!(promo[1].name, "Super Hemat");
}

#[test]
fn test_category_tree_leaf_branch_property() {
    let decoder = Decoder::new();
    let document = Html::parse_document(CATEGORY_FIXTURE);

    let supers = decoder.decode_categories(&document).unwrap();

    for group in &supers {
        for category in &group.categories {
            // A category either carries subcategories or omits the field
            match &category.subcategories {
                None => assert!(category.is_leaf()),
                Some(subs) => {
                    for sub in subs {
                        assert_eq!(sub, sub.trim());
                        assert!(!sub.contains('\n'));
                    }
                }
            }
        }
    }
}

#[test]
fn test_decode_listing_page() {
    let decoder = Decoder::new();
    let document = Html::parse_document(LISTING_FIXTURE_1);

    let listing = decoder.decode_products(&document).unwrap();

    // Breadcrumb label is whitespace-collapsed and shared by every product
    assert_eq!(listing.category, "Perawatan Rambut");
    assert_eq!(listing.count(), 3);
    assert!(listing.products.iter().all(|p| p.category == "Perawatan Rambut"));

    let shampoo = &listing.products[0];
    assert_eq!(shampoo.plu, "20010381");
    assert_eq!(
        shampoo.link,
        "https://www.klikindomaret.com/product/lifebuoy-shampoo-anti-dandruff-170ml-20010381"
    );
    assert_eq!(shampoo.title, "Lifebuoy Shampoo Anti Dandruff 170Ml");
    assert_eq!(shampoo.price, 15_900);
    assert_eq!(shampoo.old_price, Some(26_900));
    assert_eq!(shampoo.discount.as_deref(), Some("41%"));
    assert!(shampoo.is_discount);
    assert!(!shampoo.is_flash_sale);

    let conditioner = &listing.products[1];
    assert_eq!(conditioner.price, 28_300);
    assert!(conditioner.old_price.is_none());
    assert!(!conditioner.is_discount);
    assert!(conditioner.is_flash_sale);
}

#[test]
fn test_listing_invariants() {
    let decoder = Decoder::new();

    for fixture in [LISTING_FIXTURE_1, LISTING_FIXTURE_2] {
        let document = Html::parse_document(fixture);
        let listing = decoder.decode_products(&document).unwrap();

        for product in &listing.products {
            assert_eq!(product.is_discount, product.discount.is_some());
            assert!(product.link.starts_with("https://www.klikindomaret.com"));
            if let Some(old) = product.old_price {
                assert!(old >= product.price);
            }
        }
    }
}

#[test]
fn test_decode_page_count_from_listing() {
    let decoder = Decoder::new();

    let document = Html::parse_document(LISTING_FIXTURE_1);
    assert_eq!(decoder.decode_page_count(&document).unwrap(), 2);

    let document = Html::parse_document(LISTING_FIXTURE_2);
    assert_eq!(decoder.decode_page_count(&document).unwrap(), 2);
}

#[test]
fn test_category_page_is_not_a_listing() {
    let decoder = Decoder::new();
    let document = Html::parse_document(CATEGORY_FIXTURE);

    let err = decoder.decode_products(&document).unwrap_err();
    assert!(matches!(err, ScrapeError::StructureMismatch { .. }));
}

#[test]
fn test_listing_page_is_not_a_category_tree() {
    let decoder = Decoder::new();
    let document = Html::parse_document(LISTING_FIXTURE_1);

    let err = decoder.decode_categories(&document).unwrap_err();
    assert!(matches!(err, ScrapeError::StructureMismatch { .. }));
}
