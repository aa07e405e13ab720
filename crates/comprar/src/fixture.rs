//! In-memory storefront model implementing [`DomDriver`].
//!
//! The fixture reproduces the storefront's DOM contract (positional
//! product buttons, the basket badge, filter dropdowns, paginated
//! result cards, the identity flow) over plain state, so the whole
//! suite runs without a browser. The CDP driver and this fixture are
//! interchangeable behind the trait.
//!
//! Catalog data mirrors the sample storefront: 14 products across two
//! brands and three types, paginated 10 per page, so the all-brands /
//! all-types result set spans two pages and exercises pagination.

use async_trait::async_trait;

use crate::catalog::FilterId;
use crate::driver::DomDriver;
use crate::page;
use crate::result::{ComprarError, ComprarResult};
use crate::selector::Selector;
use crate::session::{DEFAULT_PASSWORD, DEFAULT_USERNAME};

/// Items rendered per catalog page
pub const PAGE_SIZE: usize = 10;

/// One catalog product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CatalogItem {
    name: &'static str,
    /// Brand as its 1-based dropdown option (2 = Net Core, 3 = Others)
    brand: usize,
    /// Type as its 1-based dropdown option (2 = Mug, 3 = TShirt, 4 = Pin)
    ty: usize,
}

const fn item(name: &'static str, brand: usize, ty: usize) -> CatalogItem {
    CatalogItem { name, brand, ty }
}

/// The 14-product catalog: Net Core has 2 mugs, 3 t-shirts, 2 pins;
/// Others has 2 mugs, 4 t-shirts, 1 pin.
const CATALOG: [CatalogItem; 14] = [
    item(".NET Black & White Mug", 2, 2),
    item("Cup<T> White Mug", 2, 2),
    item(".NET Foundation T-shirt", 2, 3),
    item("Prism White T-Shirt", 2, 3),
    item("Roslyn Red T-Shirt", 2, 3),
    item(".NET Foundation Pin", 2, 4),
    item("Roslyn Red Pin", 2, 4),
    item("Kudu Purple Mug", 3, 2),
    item("Azure Mug", 3, 2),
    item("Kudu Purple T-Shirt", 3, 3),
    item("Azure Dark Blue T-Shirt", 3, 3),
    item("Modern White T-Shirt", 3, 3),
    item("Seattle Skyline T-Shirt", 3, 3),
    item("Azure Pin", 3, 4),
];

/// What a selector resolves to on the modeled page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    ProductButton(usize),
    BasketIcon,
    BasketBadge,
    CatalogItem,
    Next,
    Previous,
    FilterMenu(FilterId),
    FilterOption(FilterId, usize),
    ApplyFilters,
    LoginLink,
    UsernameInput,
    PasswordInput,
    LoginSubmit,
    IdentityName,
    LogoutLink,
    Unknown,
}

fn resolve(selector: &Selector) -> Target {
    for slot in 1..=PAGE_SIZE {
        if *selector == page::product_button(slot) {
            return Target::ProductButton(slot);
        }
    }
    for filter in [FilterId::Brand, FilterId::Type] {
        if *selector == page::filter_menu(filter.element_id()) {
            return Target::FilterMenu(filter);
        }
        for option in 1..=filter.labels().len() {
            if *selector == page::filter_option(filter.element_id(), option) {
                return Target::FilterOption(filter, option);
            }
        }
    }
    if *selector == page::basket_icon() {
        Target::BasketIcon
    } else if *selector == page::basket_badge() {
        Target::BasketBadge
    } else if *selector == page::catalog_item() {
        Target::CatalogItem
    } else if *selector == page::next_button() {
        Target::Next
    } else if *selector == page::previous_button() {
        Target::Previous
    } else if *selector == page::apply_filters_button() {
        Target::ApplyFilters
    } else if *selector == page::login_link() {
        Target::LoginLink
    } else if *selector == page::username_input() {
        Target::UsernameInput
    } else if *selector == page::password_input() {
        Target::PasswordInput
    } else if *selector == page::login_submit() {
        Target::LoginSubmit
    } else if *selector == page::identity_name() {
        Target::IdentityName
    } else if *selector == page::logout_link() {
        Target::LogoutLink
    } else {
        Target::Unknown
    }
}

/// In-memory storefront implementing [`DomDriver`]
#[derive(Debug)]
pub struct StorefrontFixture {
    url: String,
    /// Applied filters, as 1-based dropdown options
    brand_filter: usize,
    type_filter: usize,
    /// Selected-but-not-applied filters
    pending_brand: usize,
    pending_type: usize,
    /// 0-based result page
    page_index: usize,
    basket_items: usize,
    authenticated: bool,
    login_form_open: bool,
    identity_menu_open: bool,
    username_entry: String,
    password_entry: String,
    expected_username: String,
    expected_password: String,
    /// When true, options render only after the menu is clicked open
    menu_dropdowns: bool,
    open_menu: Option<FilterId>,
    closed: bool,
}

impl Default for StorefrontFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontFixture {
    /// Create a fixture with options rendered directly in the DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: String::new(),
            brand_filter: 1,
            type_filter: 1,
            pending_brand: 1,
            pending_type: 1,
            page_index: 0,
            basket_items: 0,
            authenticated: false,
            login_form_open: false,
            identity_menu_open: false,
            username_entry: String::new(),
            password_entry: String::new(),
            expected_username: DEFAULT_USERNAME.to_string(),
            expected_password: DEFAULT_PASSWORD.to_string(),
            menu_dropdowns: false,
            open_menu: None,
            closed: false,
        }
    }

    /// Create a fixture whose dropdowns nest options behind a menu
    /// click (the layout the `MenuThenOption` strategy handles)
    #[must_use]
    pub fn with_menu_dropdowns() -> Self {
        Self {
            menu_dropdowns: true,
            ..Self::new()
        }
    }

    /// Number of items currently in the basket
    #[must_use]
    pub const fn basket_items(&self) -> usize {
        self.basket_items
    }

    /// Whether the browser resources were released
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn filtered(&self) -> Vec<CatalogItem> {
        CATALOG
            .iter()
            .copied()
            .filter(|item| self.brand_filter == 1 || item.brand == self.brand_filter)
            .filter(|item| self.type_filter == 1 || item.ty == self.type_filter)
            .collect()
    }

    fn page_items(&self) -> Vec<CatalogItem> {
        self.filtered()
            .into_iter()
            .skip(self.page_index * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    fn has_next(&self) -> bool {
        (self.page_index + 1) * PAGE_SIZE < self.filtered().len()
    }

    fn present(&self, target: Target) -> bool {
        match target {
            Target::ProductButton(slot) => slot <= self.page_items().len(),
            Target::CatalogItem => !self.page_items().is_empty(),
            Target::BasketBadge | Target::IdentityName => self.authenticated,
            Target::FilterOption(filter, _) => {
                !self.menu_dropdowns || self.open_menu == Some(filter)
            }
            Target::LoginLink => !self.authenticated && !self.login_form_open,
            Target::UsernameInput | Target::PasswordInput | Target::LoginSubmit => {
                self.login_form_open
            }
            Target::LogoutLink => self.authenticated && self.identity_menu_open,
            Target::BasketIcon
            | Target::Next
            | Target::Previous
            | Target::FilterMenu(_)
            | Target::ApplyFilters => true,
            Target::Unknown => false,
        }
    }

    fn displayed(&self, target: Target) -> bool {
        match target {
            Target::Next => self.has_next(),
            Target::Previous => self.page_index > 0,
            other => self.present(other),
        }
    }

    fn not_found(selector: &Selector) -> ComprarError {
        ComprarError::ElementNotFound {
            selector: selector.to_string(),
            waited_ms: 0,
        }
    }

    fn product_button_class(&self) -> &'static str {
        if self.authenticated {
            page::ENABLED_PRODUCT_BUTTON_CLASS
        } else {
            page::DISABLED_PRODUCT_BUTTON_CLASS
        }
    }
}

#[async_trait]
impl DomDriver for StorefrontFixture {
    async fn navigate(&mut self, url: &str) -> ComprarResult<()> {
        if !url.starts_with("http") {
            return Err(ComprarError::NavigationError {
                url: url.to_string(),
                message: "unsupported scheme".to_string(),
            });
        }
        let expected_username = std::mem::take(&mut self.expected_username);
        let expected_password = std::mem::take(&mut self.expected_password);
        *self = Self {
            url: url.to_string(),
            expected_username,
            expected_password,
            menu_dropdowns: self.menu_dropdowns,
            ..Self::new()
        };
        Ok(())
    }

    async fn is_present(&self, selector: &Selector) -> ComprarResult<bool> {
        Ok(self.present(resolve(selector)))
    }

    async fn is_displayed(&self, selector: &Selector) -> ComprarResult<bool> {
        Ok(self.displayed(resolve(selector)))
    }

    async fn count(&self, selector: &Selector) -> ComprarResult<usize> {
        let target = resolve(selector);
        match target {
            Target::CatalogItem => Ok(self.page_items().len()),
            other => Ok(usize::from(self.present(other))),
        }
    }

    async fn text_of(&self, selector: &Selector) -> ComprarResult<String> {
        let target = resolve(selector);
        if !self.present(target) {
            return Err(Self::not_found(selector));
        }
        match target {
            Target::BasketBadge => Ok(self.basket_items.to_string()),
            Target::IdentityName => Ok(self.expected_username.clone()),
            Target::FilterOption(filter, option) => {
                Ok(filter.labels()[option - 1].to_string())
            }
            _ => Ok(String::new()),
        }
    }

    async fn attribute_of(
        &self,
        selector: &Selector,
        name: &str,
    ) -> ComprarResult<Option<String>> {
        let target = resolve(selector);
        if !self.present(target) {
            return Err(Self::not_found(selector));
        }
        if name != "class" {
            return Ok(None);
        }
        match target {
            Target::ProductButton(_) => Ok(Some(self.product_button_class().to_string())),
            Target::CatalogItem => Ok(Some("esh-catalog-item".to_string())),
            Target::BasketBadge => Ok(Some("esh-basketstatus-badge".to_string())),
            _ => Ok(None),
        }
    }

    async fn click(&mut self, selector: &Selector) -> ComprarResult<()> {
        let target = resolve(selector);
        if !self.present(target) {
            return Err(Self::not_found(selector));
        }
        match target {
            Target::ProductButton(_) => {
                // Disabled buttons swallow the click, like the real page.
                if self.authenticated {
                    self.basket_items += 1;
                }
            }
            Target::Next => {
                if self.has_next() {
                    self.page_index += 1;
                }
            }
            Target::Previous => {
                self.page_index = self.page_index.saturating_sub(1);
            }
            Target::FilterMenu(filter) => {
                self.open_menu = Some(filter);
            }
            Target::FilterOption(filter, option) => {
                match filter {
                    FilterId::Brand => self.pending_brand = option,
                    FilterId::Type => self.pending_type = option,
                }
                self.open_menu = None;
            }
            Target::ApplyFilters => {
                self.brand_filter = self.pending_brand;
                self.type_filter = self.pending_type;
                self.page_index = 0;
                self.open_menu = None;
            }
            Target::LoginLink => {
                self.login_form_open = true;
            }
            Target::LoginSubmit => {
                if self.username_entry == self.expected_username
                    && self.password_entry == self.expected_password
                {
                    self.authenticated = true;
                    self.login_form_open = false;
                }
            }
            Target::IdentityName => {
                self.identity_menu_open = !self.identity_menu_open;
            }
            Target::LogoutLink => {
                self.authenticated = false;
                self.identity_menu_open = false;
            }
            Target::BasketIcon
            | Target::BasketBadge
            | Target::CatalogItem
            | Target::UsernameInput
            | Target::PasswordInput => {}
            Target::Unknown => return Err(Self::not_found(selector)),
        }
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> ComprarResult<()> {
        let target = resolve(selector);
        if !self.present(target) {
            return Err(Self::not_found(selector));
        }
        match target {
            Target::UsernameInput => self.username_entry = text.to_string(),
            Target::PasswordInput => self.password_entry = text.to_string(),
            _ => {
                return Err(ComprarError::PageError {
                    message: format!("{selector} does not accept text input"),
                })
            }
        }
        Ok(())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        Ok(self.url.clone())
    }

    async fn close(&mut self) -> ComprarResult<()> {
        self.closed = true;
        Ok(())
    }
}
