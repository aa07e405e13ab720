//! Wait mechanisms: bounded polling of DOM preconditions.
//!
//! Every interaction in the suite goes through a wait: poll the DOM
//! until a condition holds or the budget elapses. A timeout is terminal
//! for the current test case and surfaces as `ElementNotFound`, carrying
//! the selector and the time spent polling.

use std::time::{Duration, Instant};

use crate::driver::DomDriver;
use crate::result::{ComprarError, ComprarResult};
use crate::selector::Selector;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Conditions an element can be waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCondition {
    /// At least one match exists in the DOM
    Present,
    /// The first match is rendered with a layout box
    Visible,
    /// The first match is rendered and accepts clicks
    Clickable,
}

impl ElementCondition {
    /// Get a short name for diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
        }
    }
}

impl std::fmt::Display for ElementCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Waiter for DOM synchronization.
///
/// The waiter holds only the polling budget; all state it polls lives in
/// the DOM, read fresh through the driver on every probe.
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a new waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Get the wait options
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll until the element satisfies the condition.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when the budget elapses first.
    pub async fn wait_until<D: DomDriver + ?Sized>(
        &self,
        driver: &D,
        selector: &Selector,
        condition: ElementCondition,
    ) -> ComprarResult<()> {
        let start = Instant::now();

        loop {
            let satisfied = match condition {
                ElementCondition::Present => driver.is_present(selector).await?,
                // Clickability beyond visibility (overlay interception) is
                // handled by the click helper's retry, not the poll.
                ElementCondition::Visible | ElementCondition::Clickable => {
                    driver.is_displayed(selector).await?
                }
            };
            if satisfied {
                return Ok(());
            }
            if start.elapsed() >= self.options.timeout() {
                return Err(ComprarError::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: self.options.timeout_ms,
                });
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
    }

    /// Wait for the element to be visible
    pub async fn wait_until_visible<D: DomDriver + ?Sized>(
        &self,
        driver: &D,
        selector: &Selector,
    ) -> ComprarResult<()> {
        self.wait_until(driver, selector, ElementCondition::Visible)
            .await
    }

    /// Wait for the element to be clickable
    pub async fn wait_until_clickable<D: DomDriver + ?Sized>(
        &self,
        driver: &D,
        selector: &Selector,
    ) -> ComprarResult<()> {
        self.wait_until(driver, selector, ElementCondition::Clickable)
            .await
    }
}
