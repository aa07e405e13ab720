//! Selector abstraction for element lookup.
//!
//! The storefront contract mixes XPath positions, element ids, and CSS
//! class names, so a selector is an enum rather than a raw string. The
//! `to_*_query` methods produce the JavaScript the CDP driver evaluates;
//! the in-memory fixture matches on the enum directly.

use serde::{Deserialize, Serialize};

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "div.esh-identity a")
    Css(String),
    /// XPath selector (the storefront pins buttons by position)
    XPath(String),
    /// Element id selector
    Id(String),
    /// Class name selector
    ClassName(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class name selector
    #[must_use]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Convert to a JavaScript expression resolving to the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::ClassName(name) => format!("document.getElementsByClassName({name:?})[0]"),
        }
    }

    /// Convert to a JavaScript expression counting all matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
            ),
            Self::Id(id) => format!("document.getElementById({id:?}) ? 1 : 0"),
            Self::ClassName(name) => format!("document.getElementsByClassName({name:?}).length"),
        }
    }

    /// Convert to a JavaScript expression testing rendered visibility
    #[must_use]
    pub fn to_visibility_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return !!el && !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length); }})()",
            self.to_query()
        )
    }

    /// Convert to a JavaScript expression reading text content
    #[must_use]
    pub fn to_text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.textContent : null; }})()",
            self.to_query()
        )
    }

    /// Convert to a JavaScript expression reading an attribute
    #[must_use]
    pub fn to_attribute_query(&self, name: &str) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.getAttribute({name:?}) : null; }})()",
            self.to_query()
        )
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(id) => write!(f, "id={id}"),
            Self::ClassName(name) => write!(f, "class={name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = Selector::css("div.esh-identity a").to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("esh-identity"));
        }

        #[test]
        fn test_xpath_query() {
            let query = Selector::xpath("/html/body/div/div[3]/div[1]/form/input[1]").to_query();
            assert!(query.contains("document.evaluate"));
            assert!(query.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn test_id_query() {
            let query = Selector::id("Next").to_query();
            assert!(query.contains("getElementById"));
            assert!(query.contains("Next"));
        }

        #[test]
        fn test_class_count_query() {
            let query = Selector::class_name("esh-catalog-item").to_count_query();
            assert!(query.contains("getElementsByClassName"));
            assert!(query.contains(".length"));
        }

        #[test]
        fn test_xpath_count_query() {
            let query = Selector::xpath("//*[@id=\"BrandFilterApplied\"]/option[2]").to_count_query();
            assert!(query.contains("SNAPSHOT"));
            assert!(query.contains("snapshotLength"));
        }

        #[test]
        fn test_visibility_query_checks_layout() {
            let query = Selector::id("Next").to_visibility_query();
            assert!(query.contains("offsetWidth"));
            assert!(query.contains("getClientRects"));
        }

        #[test]
        fn test_attribute_query() {
            let query = Selector::css("input").to_attribute_query("class");
            assert!(query.contains("getAttribute"));
            assert!(query.contains("class"));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_forms() {
            assert_eq!(Selector::id("Next").to_string(), "id=Next");
            assert_eq!(
                Selector::class_name("esh-basketstatus-badge").to_string(),
                "class=esh-basketstatus-badge"
            );
            assert!(Selector::xpath("//a").to_string().starts_with("xpath="));
        }
    }
}
