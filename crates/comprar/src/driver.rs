//! `DomDriver` - abstract browser automation trait.
//!
//! The flow logic never talks to a concrete browser binding. Everything
//! goes through this trait, which has two implementations:
//!
//! - `CdpDriver` (feature `browser`) - real Chromium via chromiumoxide
//! - `StorefrontFixture` - an in-memory storefront model for unit and
//!   scenario tests without a browser
//!
//! The abstraction also protects against CDP binding churn: if
//! chromiumoxide is replaced, only `browser.rs` changes.

use async_trait::async_trait;

use crate::result::ComprarResult;
use crate::selector::Selector;

/// Abstract driver for DOM location, reads, and input dispatch.
///
/// Mutating operations (`navigate`, `click`, `type_text`) take `&mut
/// self`; the suite is single-threaded and sequential, so the borrow
/// checker enforces the "re-read after every mutation" invariant for
/// free.
#[async_trait]
pub trait DomDriver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&mut self, url: &str) -> ComprarResult<()>;

    /// Check whether at least one element matches
    async fn is_present(&self, selector: &Selector) -> ComprarResult<bool>;

    /// Check whether the first match is rendered (has a layout box)
    async fn is_displayed(&self, selector: &Selector) -> ComprarResult<bool>;

    /// Count matching elements
    async fn count(&self, selector: &Selector) -> ComprarResult<usize>;

    /// Read the text content of the first match
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    async fn text_of(&self, selector: &Selector) -> ComprarResult<String>;

    /// Read an attribute of the first match (`None` if the attribute is absent)
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    async fn attribute_of(
        &self,
        selector: &Selector,
        name: &str,
    ) -> ComprarResult<Option<String>>;

    /// Dispatch a click on the first match
    async fn click(&mut self, selector: &Selector) -> ComprarResult<()>;

    /// Type text into the first match
    async fn type_text(&mut self, selector: &Selector, text: &str) -> ComprarResult<()>;

    /// Get the current URL
    async fn current_url(&self) -> ComprarResult<String>;

    /// Release the underlying browser resources
    async fn close(&mut self) -> ComprarResult<()>;
}
