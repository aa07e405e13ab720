//! The storefront DOM contract.
//!
//! The eShop sample pins several controls by XPath position and marks
//! the rest with ids and CSS classes. All of that coupling lives in this
//! module so the flow code reads in domain terms and a markup change is
//! a one-file fix.

use crate::selector::Selector;

/// Class the storefront renders on an enabled product add button.
///
/// The markup carries a trailing space; the assertion compares the raw
/// attribute value, so the constant keeps it.
pub const ENABLED_PRODUCT_BUTTON_CLASS: &str = "esh-catalog-button ";

/// Class the storefront renders on a disabled (unauthenticated) product add button
pub const DISABLED_PRODUCT_BUTTON_CLASS: &str = "esh-catalog-button is-disabled";

/// Add-to-basket button for the 1-based product slot on the current page
#[must_use]
pub fn product_button(slot: usize) -> Selector {
    Selector::xpath(format!("/html/body/div/div[3]/div[{slot}]/form/input[1]"))
}

/// Basket icon in the page header
#[must_use]
pub fn basket_icon() -> Selector {
    Selector::xpath("/html/body/header/div/article/section[3]/a")
}

/// Badge showing the basket item count
#[must_use]
pub fn basket_badge() -> Selector {
    Selector::class_name("esh-basketstatus-badge")
}

/// One rendered catalog result card
#[must_use]
pub fn catalog_item() -> Selector {
    Selector::class_name("esh-catalog-item")
}

/// Pagination control advancing to the next page
#[must_use]
pub fn next_button() -> Selector {
    Selector::id("Next")
}

/// Pagination control returning to the previous page
#[must_use]
pub fn previous_button() -> Selector {
    Selector::id("Previous")
}

/// Dropdown menu for a filter, addressed by its element id
#[must_use]
pub fn filter_menu(filter_id: &str) -> Selector {
    Selector::id(filter_id)
}

/// The Nth (1-based) option of a filter dropdown
#[must_use]
pub fn filter_option(filter_id: &str, option: usize) -> Selector {
    Selector::xpath(format!("//*[@id=\"{filter_id}\"]/option[{option}]"))
}

/// Button committing the currently selected filters
#[must_use]
pub fn apply_filters_button() -> Selector {
    Selector::xpath("/html/body/section[2]/div/form/input[1]")
}

/// Header link starting the login flow
#[must_use]
pub fn login_link() -> Selector {
    Selector::css("a[href*='Account/SignIn']")
}

/// Username input on the identity form
#[must_use]
pub fn username_input() -> Selector {
    Selector::id("Username")
}

/// Password input on the identity form
#[must_use]
pub fn password_input() -> Selector {
    Selector::id("Password")
}

/// Submit button on the identity form
#[must_use]
pub fn login_submit() -> Selector {
    Selector::css("button[value='login']")
}

/// Header element showing the authenticated user name
#[must_use]
pub fn identity_name() -> Selector {
    Selector::css(".esh-identity-name")
}

/// Dropdown link ending the session
#[must_use]
pub fn logout_link() -> Selector {
    Selector::css("a[href*='Account/SignOut']")
}
