//! Catalog flow: filter selection, product-add actions, and item counting.
//!
//! This is the testable core of the suite. It holds no DOM state of its
//! own; "which filter is applied" lives in the page, and every count is
//! a fresh read through the driver.

use tracing::debug;

use crate::click;
use crate::driver::DomDriver;
use crate::page;
use crate::result::{ComprarError, ComprarResult};
use crate::selector::Selector;
use crate::session::Session;
use crate::wait::{ElementCondition, Waiter};

/// Upper bound on catalog pages walked while counting.
///
/// The loop is general over "Next is displayed"; the cap only guards
/// against a storefront that renders a Next control forever.
pub const MAX_CATALOG_PAGES: usize = 10;

/// A catalog filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterId {
    /// Brand filter (`BrandFilterApplied`)
    Brand,
    /// Type filter (`TypesFilterApplied`)
    Type,
}

impl FilterId {
    /// DOM id of the dropdown element
    #[must_use]
    pub const fn element_id(&self) -> &'static str {
        match self {
            Self::Brand => "BrandFilterApplied",
            Self::Type => "TypesFilterApplied",
        }
    }

    /// Display names of the dropdown options, in DOM order
    #[must_use]
    pub const fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Brand => &["All Brands", "Net Core", "Others"],
            Self::Type => &["All Types", "Mug", "TShirt", "Pin"],
        }
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element_id())
    }
}

/// A dropdown choice: filter plus 1-based option index.
///
/// Page-scoped and transient; once the filter is applied the page
/// reloads and the selection has no further meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    /// Which dropdown
    pub filter: FilterId,
    /// 1-based option index
    pub option: usize,
}

impl FilterSelection {
    /// Select a brand option
    #[must_use]
    pub const fn brand(option: usize) -> Self {
        Self {
            filter: FilterId::Brand,
            option,
        }
    }

    /// Select a type option
    #[must_use]
    pub const fn type_(option: usize) -> Self {
        Self {
            filter: FilterId::Type,
            option,
        }
    }

    /// Display name of the selected option, if the index is in range
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        self.option
            .checked_sub(1)
            .and_then(|i| self.filter.labels().get(i).copied())
    }
}

/// How a dropdown option is reached in the rendered DOM.
///
/// The storefront renders the dropdown either with options directly in
/// the tree, or nested behind a menu that must first be clicked open.
/// The strategy is chosen once per selection by probing for the direct
/// form, not by catching a locate error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLookup {
    /// Option elements are directly present
    DirectOption,
    /// The menu must be opened before options materialize
    MenuThenOption,
}

impl OptionLookup {
    /// Probe the DOM once and pick the strategy.
    pub async fn probe<D: DomDriver + ?Sized>(
        driver: &D,
        filter_id: &str,
    ) -> ComprarResult<Self> {
        let direct = page::filter_option(filter_id, 1);
        if driver.is_present(&direct).await? {
            Ok(Self::DirectOption)
        } else {
            Ok(Self::MenuThenOption)
        }
    }

    /// Resolve the selector for the wanted option, opening the menu
    /// first when the strategy requires it.
    pub async fn locate<D: DomDriver + ?Sized>(
        self,
        driver: &mut D,
        waiter: &Waiter,
        filter_id: &str,
        option: usize,
    ) -> ComprarResult<Selector> {
        let selector = page::filter_option(filter_id, option);
        if self == Self::MenuThenOption {
            click::element(driver, waiter, &page::filter_menu(filter_id)).await?;
            waiter
                .wait_until(driver, &selector, ElementCondition::Present)
                .await?;
        }
        Ok(selector)
    }
}

/// Orchestrates catalog interactions over a scoped [`Session`].
#[derive(Debug)]
pub struct CatalogFlow<'a, D: DomDriver> {
    session: &'a mut Session<D>,
    waiter: Waiter,
}

impl<'a, D: DomDriver> CatalogFlow<'a, D> {
    /// Create a flow over the given session
    pub fn new(session: &'a mut Session<D>) -> Self {
        let waiter = session.waiter().clone();
        Self { session, waiter }
    }

    /// Add the product in the given 1-based slot to the basket.
    ///
    /// The display name is used only for logging and failure context.
    /// Asserts the button is enabled, clicks it, and asserts the basket
    /// count grew by exactly one.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the slot has no add button;
    /// `AssertionFailed` on a disabled button or a count mismatch.
    pub async fn add_product_to_basket(&mut self, slot: usize, name: &str) -> ComprarResult<()> {
        debug!(product = name, slot, "adding product to basket");

        let button = page::product_button(slot);
        self.waiter
            .wait_until(self.session.driver(), &button, ElementCondition::Present)
            .await?;
        let class = self
            .session
            .driver()
            .attribute_of(&button, "class")
            .await?
            .unwrap_or_default();
        if class != page::ENABLED_PRODUCT_BUTTON_CLASS {
            return Err(ComprarError::assertion(
                format!("product button for '{name}' expected enabled"),
                format!("{:?}", page::ENABLED_PRODUCT_BUTTON_CLASS),
                format!("{class:?}"),
            ));
        }

        let before = self.basket_count().await?;
        click::element(self.session.driver_mut(), &self.waiter, &button).await?;

        let after = self.basket_count().await?;
        if after != before + 1 {
            return Err(ComprarError::assertion(
                format!("basket count after adding '{name}'"),
                before + 1,
                after,
            ));
        }
        Ok(())
    }

    /// Assert the first product button carries the disabled class.
    ///
    /// Used pre-login and post-logout to confirm authentication gates
    /// purchasing.
    pub async fn check_product_button_disabled(&mut self) -> ComprarResult<()> {
        debug!("checking that the product buttons are disabled");
        let button = page::product_button(1);
        self.waiter
            .wait_until(self.session.driver(), &button, ElementCondition::Present)
            .await?;
        let class = self
            .session
            .driver()
            .attribute_of(&button, "class")
            .await?
            .unwrap_or_default();
        if class != page::DISABLED_PRODUCT_BUTTON_CLASS {
            return Err(ComprarError::assertion(
                "product button expected disabled",
                format!("{:?}", page::DISABLED_PRODUCT_BUTTON_CLASS),
                format!("{class:?}"),
            ));
        }
        Ok(())
    }

    /// Read the basket item count from the header badge.
    ///
    /// Always a fresh DOM read; never cached.
    pub async fn basket_count(&mut self) -> ComprarResult<usize> {
        self.waiter
            .wait_until_visible(self.session.driver(), &page::basket_icon())
            .await?;
        let text = self.session.driver().text_of(&page::basket_badge()).await?;
        let trimmed = text.trim();
        let count = trimmed
            .parse::<usize>()
            .map_err(|_| ComprarError::PageError {
                message: format!("basket badge text {trimmed:?} is not a number"),
            })?;
        debug!(count, "basket count read");
        Ok(count)
    }

    /// Select a dropdown option and commit it with the apply control.
    ///
    /// # Errors
    ///
    /// `InvalidState` for an out-of-range option index, otherwise any
    /// locate/click failure.
    pub async fn select_filter(&mut self, selection: FilterSelection) -> ComprarResult<()> {
        let labels = selection.filter.labels();
        let Some(label) = selection.label() else {
            return Err(ComprarError::InvalidState {
                message: format!(
                    "{} has no option {} (valid: 1..={})",
                    selection.filter,
                    selection.option,
                    labels.len()
                ),
            });
        };

        let filter_id = selection.filter.element_id();
        let lookup = OptionLookup::probe(self.session.driver(), filter_id).await?;
        debug!(filter = filter_id, label, strategy = ?lookup, "selecting filter option");

        let option_selector = lookup
            .locate(
                self.session.driver_mut(),
                &self.waiter,
                filter_id,
                selection.option,
            )
            .await?;
        click::element(self.session.driver_mut(), &self.waiter, &option_selector).await?;

        debug!("applying selected filters");
        click::element(
            self.session.driver_mut(),
            &self.waiter,
            &page::apply_filters_button(),
        )
        .await?;
        Ok(())
    }

    /// Select a brand filter option: 1) All Brands, 2) Net Core, 3) Others
    pub async fn select_brand_filter(&mut self, option: usize) -> ComprarResult<()> {
        self.select_filter(FilterSelection::brand(option)).await
    }

    /// Select a type filter option: 1) All Types, 2) Mug, 3) TShirt, 4) Pin
    pub async fn select_type_filter(&mut self, option: usize) -> ComprarResult<()> {
        self.select_filter(FilterSelection::type_(option)).await
    }

    /// Count the displayed catalog items across all result pages.
    ///
    /// Walks forward while the Next control is displayed, summing each
    /// page, then rewinds to the first page so back-to-back calls
    /// observe identical state.
    ///
    /// # Errors
    ///
    /// `InvalidState` if pagination exceeds [`MAX_CATALOG_PAGES`].
    pub async fn number_catalog_displayed_items(&mut self) -> ComprarResult<usize> {
        let mut total = 0;
        let mut pages = 0;

        loop {
            let on_page = self
                .session
                .driver()
                .count(&page::catalog_item())
                .await?;
            total += on_page;
            pages += 1;
            if !self
                .session
                .driver()
                .is_displayed(&page::next_button())
                .await?
            {
                break;
            }
            if pages >= MAX_CATALOG_PAGES {
                return Err(ComprarError::InvalidState {
                    message: format!("catalog pagination exceeded {MAX_CATALOG_PAGES} pages"),
                });
            }
            debug!(page = pages, running_total = total, "advancing to next catalog page");
            click::element(self.session.driver_mut(), &self.waiter, &page::next_button())
                .await?;
        }

        let mut rewinds = 0;
        while self
            .session
            .driver()
            .is_displayed(&page::previous_button())
            .await?
        {
            rewinds += 1;
            if rewinds >= MAX_CATALOG_PAGES {
                return Err(ComprarError::InvalidState {
                    message: format!("catalog rewind exceeded {MAX_CATALOG_PAGES} pages"),
                });
            }
            click::element(
                self.session.driver_mut(),
                &self.waiter,
                &page::previous_button(),
            )
            .await?;
        }

        debug!(total, pages, "catalog items counted");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::StorefrontFixture;
    use crate::session::SessionConfig;

    async fn open_session(fixture: StorefrontFixture) -> Session<StorefrontFixture> {
        Session::open(fixture, SessionConfig::default())
            .await
            .unwrap()
    }

    mod filter_id_tests {
        use super::*;

        #[test]
        fn test_element_ids() {
            assert_eq!(FilterId::Brand.element_id(), "BrandFilterApplied");
            assert_eq!(FilterId::Type.element_id(), "TypesFilterApplied");
        }

        #[test]
        fn test_labels_in_dom_order() {
            assert_eq!(FilterId::Brand.labels(), ["All Brands", "Net Core", "Others"]);
            assert_eq!(
                FilterId::Type.labels(),
                ["All Types", "Mug", "TShirt", "Pin"]
            );
        }

        #[test]
        fn test_selection_label() {
            assert_eq!(FilterSelection::brand(2).label(), Some("Net Core"));
            assert_eq!(FilterSelection::type_(4).label(), Some("Pin"));
            assert_eq!(FilterSelection::brand(0).label(), None);
            assert_eq!(FilterSelection::brand(4).label(), None);
        }
    }

    mod option_lookup_tests {
        use super::*;

        #[tokio::test]
        async fn test_probe_picks_direct_when_options_are_rendered() {
            let fixture = StorefrontFixture::new();
            let lookup = OptionLookup::probe(&fixture, FilterId::Brand.element_id())
                .await
                .unwrap();
            assert_eq!(lookup, OptionLookup::DirectOption);
        }

        #[tokio::test]
        async fn test_probe_picks_menu_fallback_when_options_are_nested() {
            let fixture = StorefrontFixture::with_menu_dropdowns();
            let lookup = OptionLookup::probe(&fixture, FilterId::Brand.element_id())
                .await
                .unwrap();
            assert_eq!(lookup, OptionLookup::MenuThenOption);
        }
    }

    mod flow_tests {
        use super::*;

        #[tokio::test]
        async fn test_product_button_disabled_before_login() {
            let mut session = open_session(StorefrontFixture::new()).await;
            let mut flow = CatalogFlow::new(&mut session);
            flow.check_product_button_disabled().await.unwrap();
        }

        #[tokio::test]
        async fn test_add_product_fails_when_button_disabled() {
            let mut session = open_session(StorefrontFixture::new()).await;
            let mut flow = CatalogFlow::new(&mut session);
            // Not authenticated: the button carries the disabled class,
            // so the enabled assertion fails before any click happens.
            let err = flow
                .add_product_to_basket(1, ".NET Black & White Mug")
                .await
                .unwrap_err();
            assert!(matches!(err, ComprarError::AssertionFailed { .. }));
        }

        #[tokio::test]
        async fn test_add_product_increments_basket() {
            let mut session = open_session(StorefrontFixture::new()).await;
            session.login().await.unwrap();
            let mut flow = CatalogFlow::new(&mut session);
            assert_eq!(flow.basket_count().await.unwrap(), 0);
            flow.add_product_to_basket(1, ".NET Black & White Mug")
                .await
                .unwrap();
            assert_eq!(flow.basket_count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_out_of_range_filter_option_is_invalid_state() {
            let mut session = open_session(StorefrontFixture::new()).await;
            let mut flow = CatalogFlow::new(&mut session);
            let err = flow.select_brand_filter(9).await.unwrap_err();
            assert!(matches!(err, ComprarError::InvalidState { .. }));
        }

        #[tokio::test]
        async fn test_counting_spans_pages_and_is_idempotent() {
            let mut session = open_session(StorefrontFixture::new()).await;
            let mut flow = CatalogFlow::new(&mut session);
            // 14 items and a 10-per-page catalog: the count must walk to
            // the second page and rewind afterwards.
            let first = flow.number_catalog_displayed_items().await.unwrap();
            let second = flow.number_catalog_displayed_items().await.unwrap();
            assert_eq!(first, 14);
            assert_eq!(second, 14);
        }

        #[tokio::test]
        async fn test_filter_selection_through_menu_layout() {
            let mut session = open_session(StorefrontFixture::with_menu_dropdowns()).await;
            let mut flow = CatalogFlow::new(&mut session);
            flow.select_brand_filter(2).await.unwrap();
            flow.select_type_filter(3).await.unwrap();
            assert_eq!(flow.number_catalog_displayed_items().await.unwrap(), 3);
        }
    }
}
