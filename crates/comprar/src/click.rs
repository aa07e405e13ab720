//! Click helper: wait for clickability, then dispatch.
//!
//! Clicks can be intercepted transiently (an overlay mid-fade, a reflow
//! moving the target). The helper retries those within the waiter's
//! budget; any other failure propagates immediately.

use std::time::Instant;

use tracing::debug;

use crate::driver::DomDriver;
use crate::result::{ComprarError, ComprarResult};
use crate::selector::Selector;
use crate::wait::Waiter;

/// Wait for the element to become clickable, then click it.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element never becomes clickable, or
/// the last `ClickIntercepted` if interception outlasts the budget.
pub async fn element<D: DomDriver + ?Sized>(
    driver: &mut D,
    waiter: &Waiter,
    selector: &Selector,
) -> ComprarResult<()> {
    waiter.wait_until_clickable(driver, selector).await?;

    let start = Instant::now();
    loop {
        match driver.click(selector).await {
            Ok(()) => return Ok(()),
            Err(ComprarError::ClickIntercepted { message, .. })
                if start.elapsed() < waiter.options().timeout() =>
            {
                debug!(%selector, message, "click intercepted, retrying");
                tokio::time::sleep(waiter.options().poll_interval()).await;
            }
            Err(e) => return Err(e),
        }
    }
}
