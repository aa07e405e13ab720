//! Browser control for headless testing.
//!
//! Real browser control via the Chrome DevTools Protocol. When compiled
//! with the `browser` feature, `CdpDriver` drives Chromium through
//! chromiumoxide and implements [`DomDriver`]; without the feature the
//! suite runs against the in-memory fixture only.

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 1024,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use tracing::debug;

    use super::BrowserConfig;
    use crate::driver::DomDriver;
    use crate::result::{ComprarError, ComprarResult};
    use crate::selector::Selector;

    /// Chromium driver with a real CDP connection
    #[derive(Debug)]
    pub struct CdpDriver {
        browser: CdpBrowser,
        page: CdpPage,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpDriver {
        pub(super) fn cdp_config(config: &BrowserConfig) -> ComprarResult<CdpConfig> {
            let mut builder =
                CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }
            if let Some(ref ua) = config.user_agent {
                builder = builder.arg(format!("--user-agent={ua}"));
            }

            builder
                .build()
                .map_err(|e| ComprarError::BrowserLaunchError { message: e })
        }

        /// Launch a browser instance and open a blank page.
        ///
        /// # Errors
        ///
        /// Returns `BrowserLaunchError` if Chromium cannot be started.
        pub async fn launch(config: BrowserConfig) -> ComprarResult<Self> {
            let cdp_config = Self::cdp_config(&config)?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| ComprarError::BrowserLaunchError {
                        message: e.to_string(),
                    })?;

            // Drive the CDP event stream until the browser goes away.
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser.new_page("about:blank").await.map_err(|e| {
                ComprarError::PageError {
                    message: e.to_string(),
                }
            })?;

            Ok(Self {
                browser,
                page,
                handle,
            })
        }

        async fn eval<T: DeserializeOwned>(&self, expr: String) -> ComprarResult<T> {
            let result = self
                .page
                .evaluate(expr)
                .await
                .map_err(|e| ComprarError::PageError {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })
        }

        async fn element(
            &self,
            selector: &Selector,
        ) -> ComprarResult<chromiumoxide::element::Element> {
            let lookup = match selector {
                Selector::Css(css) => self.page.find_element(css.clone()).await,
                Selector::XPath(expr) => self.page.find_xpath(expr.clone()).await,
                Selector::Id(id) => self.page.find_element(format!("#{id}")).await,
                Selector::ClassName(name) => self.page.find_element(format!(".{name}")).await,
            };
            lookup.map_err(|_| ComprarError::ElementNotFound {
                selector: selector.to_string(),
                waited_ms: 0,
            })
        }
    }

    #[async_trait]
    impl DomDriver for CdpDriver {
        async fn navigate(&mut self, url: &str) -> ComprarResult<()> {
            debug!(url, "navigating");
            self.page
                .goto(url)
                .await
                .map_err(|e| ComprarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| ComprarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn is_present(&self, selector: &Selector) -> ComprarResult<bool> {
            let count: usize = self.eval(selector.to_count_query()).await?;
            Ok(count > 0)
        }

        async fn is_displayed(&self, selector: &Selector) -> ComprarResult<bool> {
            self.eval(selector.to_visibility_query()).await
        }

        async fn count(&self, selector: &Selector) -> ComprarResult<usize> {
            self.eval(selector.to_count_query()).await
        }

        async fn text_of(&self, selector: &Selector) -> ComprarResult<String> {
            let text: Option<String> = self.eval(selector.to_text_query()).await?;
            text.ok_or_else(|| ComprarError::ElementNotFound {
                selector: selector.to_string(),
                waited_ms: 0,
            })
        }

        async fn attribute_of(
            &self,
            selector: &Selector,
            name: &str,
        ) -> ComprarResult<Option<String>> {
            if !self.is_present(selector).await? {
                return Err(ComprarError::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: 0,
                });
            }
            self.eval(selector.to_attribute_query(name)).await
        }

        async fn click(&mut self, selector: &Selector) -> ComprarResult<()> {
            let element = self.element(selector).await?;
            element
                .click()
                .await
                .map_err(|e| ComprarError::ClickIntercepted {
                    selector: selector.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn type_text(&mut self, selector: &Selector, text: &str) -> ComprarResult<()> {
            let element = self.element(selector).await?;
            element
                .click()
                .await
                .map_err(|e| ComprarError::ClickIntercepted {
                    selector: selector.to_string(),
                    message: e.to_string(),
                })?;
            element
                .type_str(text)
                .await
                .map_err(|e| ComprarError::PageError {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ComprarResult<String> {
            let url = self.page.url().await.map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| "about:blank".to_string()))
        }

        async fn close(&mut self) -> ComprarResult<()> {
            self.browser
                .close()
                .await
                .map_err(|e| ComprarError::PageError {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;
