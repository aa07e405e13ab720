//! Comprar: end-to-end test harness for the eShop storefront
//!
//! Comprar (Spanish: "to buy") drives the catalog and basket flows of the
//! eShopOnContainers MVC storefront and asserts on the item counts the
//! catalog filters produce.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    COMPRAR Architecture                        │
//! ├───────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────┐      │
//! │   │ Scenario   │    │ Catalog    │    │ DomDriver      │      │
//! │   │ Tests      │───►│ Flow /     │───►│ (CdpDriver or  │      │
//! │   │            │    │ Session    │    │  fixture)      │      │
//! │   └────────────┘    └────────────┘    └────────────────┘      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenario tests exercise [`CatalogFlow`] and [`Session`] against any
//! [`DomDriver`]. The `browser` feature adds [`CdpDriver`], a chromiumoxide
//! backend; [`StorefrontFixture`] models the storefront in memory so the
//! suite runs without a browser.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Browser configuration and the chromiumoxide-backed driver.
pub mod browser;
/// Catalog and basket flows: filters, pagination, add-to-basket.
pub mod catalog;
/// Click with wait-and-retry on interception.
pub mod click;
/// The abstract DOM driver the flows run against.
pub mod driver;
/// In-memory storefront model implementing [`DomDriver`].
pub mod fixture;
/// Tracing setup.
pub mod logging;
/// Storefront DOM contract: selectors and class constants.
pub mod page;
/// Error and result types.
pub mod result;
/// Element selectors and their JS query forms.
pub mod selector;
/// Scoped storefront session: open, login, logout.
pub mod session;
/// Polling waits for element conditions.
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::CdpDriver;
pub use browser::BrowserConfig;
pub use catalog::{CatalogFlow, FilterId, FilterSelection, OptionLookup, MAX_CATALOG_PAGES};
pub use driver::DomDriver;
pub use fixture::{StorefrontFixture, PAGE_SIZE};
pub use result::{ComprarError, ComprarResult};
pub use selector::Selector;
pub use session::{Session, SessionConfig};
pub use wait::{ElementCondition, WaitOptions, Waiter};
