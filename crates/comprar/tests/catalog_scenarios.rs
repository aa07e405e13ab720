//! Storefront scenarios: basket interactions and catalog filter counts.
//!
//! These run the same flows the browser suite runs, against the in-memory
//! storefront model so they need no Chromium.

use comprar::catalog::CatalogFlow;
use comprar::fixture::StorefrontFixture;
use comprar::session::{Session, SessionConfig};
use comprar::{logging, ComprarError};

/// Expected item counts for brand x type filter combinations.
///
/// Rows are brands (All Brands, Net Core, Others); columns are types
/// (All Types, Mug, TShirt, Pin).
const EXPECTED_COUNTS: [[usize; 4]; 3] = [[14, 4, 7, 3], [7, 2, 3, 2], [7, 2, 4, 1]];

const BRAND_LABELS: [&str; 3] = ["All Brands", "Net Core", "Others"];
const TYPE_LABELS: [&str; 4] = ["All Types", "Mug", "TShirt", "Pin"];

async fn open_session(fixture: StorefrontFixture) -> Session<StorefrontFixture> {
    logging::init();
    Session::open(fixture, SessionConfig::new())
        .await
        .expect("session should open against the fixture")
}

#[tokio::test]
async fn add_products_to_basket_increments_badge_per_product() {
    let mut session = open_session(StorefrontFixture::new()).await;

    {
        let mut flow = CatalogFlow::new(&mut session);
        flow.check_product_button_disabled()
            .await
            .expect("buttons disabled before login");
    }

    session.login().await.expect("demo login");

    {
        let mut flow = CatalogFlow::new(&mut session);
        flow.add_product_to_basket(1, ".NET Black & White Mug")
            .await
            .expect("first product added");
        flow.add_product_to_basket(3, ".NET Foundation T-shirt")
            .await
            .expect("second product added");
        flow.add_product_to_basket(6, ".NET Foundation Pin")
            .await
            .expect("third product added");
        assert_eq!(flow.basket_count().await.expect("badge readable"), 3);
    }

    session.logout().await.expect("logout");

    let mut flow = CatalogFlow::new(&mut session);
    flow.check_product_button_disabled()
        .await
        .expect("buttons disabled after logout");
}

#[tokio::test]
async fn product_buttons_stay_inert_without_login() {
    let mut session = open_session(StorefrontFixture::new()).await;
    let mut flow = CatalogFlow::new(&mut session);

    flow.check_product_button_disabled()
        .await
        .expect("anonymous visitor sees disabled buttons");

    // An enabled-state assertion against a disabled button must fail.
    let err = flow
        .add_product_to_basket(1, ".NET Black & White Mug")
        .await
        .expect_err("add must fail while logged out");
    assert!(matches!(err, ComprarError::AssertionFailed { .. }));
}

#[tokio::test]
async fn filter_combinations_yield_expected_item_counts() {
    let mut session = open_session(StorefrontFixture::new()).await;
    let mut flow = CatalogFlow::new(&mut session);

    for (brand, row) in EXPECTED_COUNTS.iter().enumerate() {
        for (ty, &expected) in row.iter().enumerate() {
            flow.select_brand_filter(brand + 1)
                .await
                .expect("brand filter applied");
            flow.select_type_filter(ty + 1)
                .await
                .expect("type filter applied");
            let displayed = flow
                .number_catalog_displayed_items()
                .await
                .expect("items counted");
            assert_eq!(
                displayed, expected,
                "{} / {}: expected {expected} items, got {displayed}",
                BRAND_LABELS[brand], TYPE_LABELS[ty]
            );
        }
    }
}

#[tokio::test]
async fn filter_counts_hold_with_dropdown_menus() {
    // Same grid against the markup variant where options live in a
    // dropdown that must be opened first.
    let mut session = open_session(StorefrontFixture::with_menu_dropdowns()).await;
    let mut flow = CatalogFlow::new(&mut session);

    for (brand, row) in EXPECTED_COUNTS.iter().enumerate() {
        for (ty, &expected) in row.iter().enumerate() {
            flow.select_brand_filter(brand + 1)
                .await
                .expect("brand filter applied");
            flow.select_type_filter(ty + 1)
                .await
                .expect("type filter applied");
            let displayed = flow
                .number_catalog_displayed_items()
                .await
                .expect("items counted");
            assert_eq!(
                displayed, expected,
                "{} / {} (dropdown menus)",
                BRAND_LABELS[brand], TYPE_LABELS[ty]
            );
        }
    }
}

#[tokio::test]
async fn counting_items_is_idempotent() {
    let mut session = open_session(StorefrontFixture::new()).await;
    let mut flow = CatalogFlow::new(&mut session);

    // The unfiltered catalog spans two pages; counting walks them and
    // must rewind, so a second count sees the same total.
    let first = flow
        .number_catalog_displayed_items()
        .await
        .expect("first count");
    let second = flow
        .number_catalog_displayed_items()
        .await
        .expect("second count");
    assert_eq!(first, 14);
    assert_eq!(first, second);
}

#[tokio::test]
async fn reapplying_a_filter_leaves_counts_unchanged() {
    let mut session = open_session(StorefrontFixture::new()).await;
    let mut flow = CatalogFlow::new(&mut session);

    flow.select_brand_filter(2).await.expect("brand filter");
    let first = flow
        .number_catalog_displayed_items()
        .await
        .expect("count after apply");

    flow.select_brand_filter(2).await.expect("same filter again");
    let second = flow
        .number_catalog_displayed_items()
        .await
        .expect("count after re-apply");

    assert_eq!(first, 7);
    assert_eq!(first, second);
}

#[tokio::test]
async fn out_of_range_filter_option_is_rejected() {
    let mut session = open_session(StorefrontFixture::new()).await;
    let mut flow = CatalogFlow::new(&mut session);

    let err = flow
        .select_brand_filter(0)
        .await
        .expect_err("option 0 is invalid");
    assert!(matches!(err, ComprarError::InvalidState { .. }));

    let err = flow
        .select_type_filter(9)
        .await
        .expect_err("option 9 is invalid");
    assert!(matches!(err, ComprarError::InvalidState { .. }));
}

#[tokio::test]
async fn session_close_shuts_down_the_driver() {
    let session = open_session(StorefrontFixture::new()).await;
    session.close().await.expect("close succeeds");
}

#[tokio::test]
async fn login_twice_is_a_session_error() {
    let mut session = open_session(StorefrontFixture::new()).await;
    session.login().await.expect("first login");
    let err = session.login().await.expect_err("second login rejected");
    assert!(matches!(err, ComprarError::SessionError { .. }));
}
