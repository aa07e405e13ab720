//! Browser session: a scoped resource owning the driver and the
//! login/logout flows.
//!
//! Each test acquires its own session with [`Session::open`] and
//! releases it with [`Session::close`]; nothing is shared between
//! cases. Certain storefront controls are disabled until the session is
//! authenticated, which the catalog flow asserts on.

use tracing::debug;

use crate::click;
use crate::driver::DomDriver;
use crate::page;
use crate::result::{ComprarError, ComprarResult};
use crate::wait::Waiter;

/// Default storefront URL (the sample's docker-compose binding)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5100";

/// Default demo credentials shipped with the storefront sample
pub const DEFAULT_USERNAME: &str = "demouser@microsoft.com";

/// Demo password paired with [`DEFAULT_USERNAME`]
pub const DEFAULT_PASSWORD: &str = "Pass@word1";

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storefront root URL
    pub base_url: String,
    /// Identity username
    pub username: String,
    /// Identity password
    pub password: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from the environment, falling back to defaults.
    ///
    /// Reads `ESHOP_BASE_URL`, `ESHOP_USERNAME`, and `ESHOP_PASSWORD`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("ESHOP_BASE_URL").unwrap_or(defaults.base_url),
            username: std::env::var("ESHOP_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("ESHOP_PASSWORD").unwrap_or(defaults.password),
        }
    }

    /// Set the storefront root URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the identity credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

/// A live storefront session over some driver.
#[derive(Debug)]
pub struct Session<D: DomDriver> {
    driver: D,
    config: SessionConfig,
    waiter: Waiter,
    authenticated: bool,
}

impl<D: DomDriver> Session<D> {
    /// Open a session: navigate to the storefront root and wait for the
    /// catalog to render.
    ///
    /// # Errors
    ///
    /// Returns a navigation error if the storefront is unreachable, or
    /// `ElementNotFound` if the catalog never renders.
    pub async fn open(mut driver: D, config: SessionConfig) -> ComprarResult<Self> {
        debug!(url = %config.base_url, "opening storefront session");
        driver.navigate(&config.base_url).await?;
        let waiter = Waiter::new();
        waiter
            .wait_until_visible(&driver, &page::catalog_item())
            .await?;
        Ok(Self {
            driver,
            config,
            waiter,
            authenticated: false,
        })
    }

    /// Authenticate with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if already authenticated, otherwise any
    /// locate/click failure from the identity flow.
    pub async fn login(&mut self) -> ComprarResult<()> {
        if self.authenticated {
            return Err(ComprarError::SessionError {
                message: "login called on an authenticated session".to_string(),
            });
        }
        debug!(user = %self.config.username, "logging in");
        click::element(&mut self.driver, &self.waiter, &page::login_link()).await?;
        self.waiter
            .wait_until_visible(&self.driver, &page::username_input())
            .await?;
        let username = self.config.username.clone();
        let password = self.config.password.clone();
        self.driver
            .type_text(&page::username_input(), &username)
            .await?;
        self.driver
            .type_text(&page::password_input(), &password)
            .await?;
        click::element(&mut self.driver, &self.waiter, &page::login_submit()).await?;
        self.waiter
            .wait_until_visible(&self.driver, &page::identity_name())
            .await?;
        self.authenticated = true;
        Ok(())
    }

    /// End the authenticated session via the identity dropdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if not authenticated.
    pub async fn logout(&mut self) -> ComprarResult<()> {
        if !self.authenticated {
            return Err(ComprarError::SessionError {
                message: "logout called on an unauthenticated session".to_string(),
            });
        }
        debug!("logging out");
        click::element(&mut self.driver, &self.waiter, &page::identity_name()).await?;
        click::element(&mut self.driver, &self.waiter, &page::logout_link()).await?;
        self.waiter
            .wait_until_visible(&self.driver, &page::login_link())
            .await?;
        self.authenticated = false;
        Ok(())
    }

    /// Whether the session has authenticated
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Borrow the driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Borrow the shared waiter
    #[must_use]
    pub const fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    /// Get the session configuration
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Release the browser.
    pub async fn close(mut self) -> ComprarResult<()> {
        debug!("closing storefront session");
        self.driver.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::StorefrontFixture;

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SessionConfig::default();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.username, DEFAULT_USERNAME);
        }

        #[test]
        fn test_builder() {
            let config = SessionConfig::new()
                .with_base_url("http://shop.test")
                .with_credentials("user@test", "secret");
            assert_eq!(config.base_url, "http://shop.test");
            assert_eq!(config.username, "user@test");
            assert_eq!(config.password, "secret");
        }
    }

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_open_login_logout_roundtrip() {
            let fixture = StorefrontFixture::new();
            let mut session = Session::open(fixture, SessionConfig::default())
                .await
                .unwrap();
            assert!(!session.is_authenticated());

            session.login().await.unwrap();
            assert!(session.is_authenticated());

            session.logout().await.unwrap();
            assert!(!session.is_authenticated());

            session.close().await.unwrap();
        }

        #[tokio::test]
        async fn test_double_login_is_a_session_error() {
            let fixture = StorefrontFixture::new();
            let mut session = Session::open(fixture, SessionConfig::default())
                .await
                .unwrap();
            session.login().await.unwrap();
            let err = session.login().await.unwrap_err();
            assert!(matches!(err, ComprarError::SessionError { .. }));
        }

        #[tokio::test]
        async fn test_logout_without_login_is_a_session_error() {
            let fixture = StorefrontFixture::new();
            let mut session = Session::open(fixture, SessionConfig::default())
                .await
                .unwrap();
            let err = session.logout().await.unwrap_err();
            assert!(matches!(err, ComprarError::SessionError { .. }));
        }
    }
}
