//! Result and error types for Comprar.

use thiserror::Error;

/// Result type for Comprar operations
pub type ComprarResult<T> = Result<T, ComprarError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum ComprarError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error (evaluation failures, malformed badge text, ...)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A required element could not be located within the wait budget
    #[error("Element not found: {selector} (waited {waited_ms}ms)")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
        /// Milliseconds spent polling before giving up
        waited_ms: u64,
    },

    /// A click was intercepted by another element (transient, retried)
    #[error("Click intercepted on {selector}: {message}")]
    ClickIntercepted {
        /// Selector being clicked
        selector: String,
        /// Error message
        message: String,
    },

    /// An observed value disagrees with the expected value
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Human-readable expected/actual context
        message: String,
    },

    /// Session error (login/logout flow broke)
    #[error("Session error: {message}")]
    SessionError {
        /// Error message
        message: String,
    },

    /// Invalid state error (operation called in wrong state)
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComprarError {
    /// Build an assertion failure with expected/actual context.
    #[must_use]
    pub fn assertion(
        context: impl std::fmt::Display,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::AssertionFailed {
            message: format!("{context}: expected {expected}, got {actual}"),
        }
    }
}
