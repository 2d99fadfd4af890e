//! Storefront event dispatcher.
//!
//! [`Storefront`] owns the store and the cart badge. Every user interaction
//! arrives as a [`StorefrontEvent`] carrying plain values, runs against the
//! services, and yields an [`Outcome`]: where to navigate and what to tell
//! the shopper. Input validation failures come back as notices; only
//! internal failures are errors.

use tracing::instrument;

use shopfront_core::{Email, Product, ProductId};

use crate::catalog::{CatalogError, ProductCard, extract_product};
use crate::error::{Notice, Result};
use crate::models::cart::Cart;
use crate::render::{self, CartPage};
use crate::routes::Page;
use crate::services::auth::AuthService;
use crate::services::cart::{CartObserver, CartService};
use crate::services::checkout::{PAYMENT_SUCCESS, PaymentDetails, submit_payment};
use crate::services::selection;
use crate::store::KeyValueStore;

/// Shown after adding from the product page without leaving it.
pub const ADDED_TO_CART: &str = "Added to cart";
/// Shown after a successful signup.
pub const SIGNUP_SUCCESS: &str = "Signup successful. Please login.";
/// Shown after a successful login.
pub const LOGIN_SUCCESS: &str = "Login successful";

/// Cart count badge, refreshed on every cart write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    count: u32,
}

impl CartBadge {
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

impl CartObserver for CartBadge {
    fn cart_saved(&mut self, cart: &Cart) {
        self.count = cart.item_count();
    }
}

/// What a product card was clicked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// The card's add-to-cart button.
    AddToCart,
    /// The card's view button.
    View,
    /// Anywhere on the card; `on_button` if the click landed on a button.
    Click { on_button: bool },
}

/// A user interaction.
#[derive(Debug, Clone)]
pub enum StorefrontEvent {
    /// Add one unit and go to the cart.
    AddToCart(Product),
    /// Stage the product and open its detail page.
    ViewProduct(Product),
    /// Click on a grid card. Clicks on the card's buttons are left to the
    /// button's own event.
    GridClick { product: Product, on_button: bool },
    /// Cart page quantity control.
    UpdateQuantity { id: ProductId, delta: i64 },
    /// Cart page remove button.
    RemoveItem(ProductId),
    /// Detail page "Add to cart & Checkout".
    BuyNow,
    /// Detail page "Add to cart".
    AddOnly,
    Signup {
        email: String,
        password: String,
        confirm_password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    SubmitPayment(PaymentDetails),
}

impl StorefrontEvent {
    /// Build the event for a click on a product card.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingId` if the card has no `data-id`.
    pub fn from_card(
        action: CardAction,
        card: &ProductCard,
    ) -> std::result::Result<Self, CatalogError> {
        let product = extract_product(card)?;
        Ok(match action {
            CardAction::AddToCart => Self::AddToCart(product),
            CardAction::View => Self::ViewProduct(product),
            CardAction::Click { on_button } => Self::GridClick { product, on_button },
        })
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Page to move to, if any.
    pub navigate: Option<Page>,
    /// Blocking message to show, if any.
    pub notice: Option<Notice>,
}

impl Outcome {
    /// Nothing to show, stay on the page.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn navigate(page: Page) -> Self {
        Self {
            navigate: Some(page),
            notice: None,
        }
    }

    #[must_use]
    pub const fn notice(notice: Notice) -> Self {
        Self {
            navigate: None,
            notice: Some(notice),
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// The storefront engine over one store.
#[derive(Debug)]
pub struct Storefront<S: KeyValueStore> {
    store: S,
    badge: CartBadge,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open the storefront, initialising the badge from the stored cart.
    pub fn new(store: S) -> Self {
        let mut storefront = Self {
            store,
            badge: CartBadge::default(),
        };
        storefront.badge.count = storefront.carts().count();
        storefront
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn carts(&mut self) -> CartService<'_, S> {
        CartService::new(&mut self.store).with_observer(&mut self.badge)
    }

    /// Current cart.
    pub fn cart(&mut self) -> Cart {
        self.carts().get_cart()
    }

    /// Add `quantity` units of `product` without navigating.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the cart cannot be written.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) -> Result<Cart> {
        Ok(self.carts().add_to_cart(product, quantity)?)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the cart key cannot be removed.
    pub fn clear_cart(&mut self) -> Result<()> {
        Ok(self.carts().clear_cart()?)
    }

    /// Units shown on the cart badge.
    #[must_use]
    pub const fn badge_count(&self) -> u32 {
        self.badge.count()
    }

    /// The staged product, if any.
    #[must_use]
    pub fn staged_product(&self) -> Option<Product> {
        selection::staged_selection(&self.store)
    }

    /// Email of the logged-in shopper, if any.
    pub fn logged_in_user(&mut self) -> Option<Email> {
        AuthService::new(&mut self.store).logged_in_user()
    }

    /// Render the cart page from the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if a template fails.
    pub fn cart_page(&mut self) -> Result<CartPage> {
        let cart = self.cart();
        Ok(render::render_cart(&cart, Page::Cart)?)
    }

    /// Render the product detail page from the staged selection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn product_page(&self) -> Result<String> {
        let staged = self.staged_product();
        Ok(render::render_product_detail(staged.as_ref(), Page::Product)?)
    }

    /// Render the cart badge.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn badge_html(&self) -> Result<String> {
        Ok(render::render_cart_count(self.badge.count())?)
    }

    /// Handle a click on a product card. A card without an id is ignored.
    ///
    /// # Errors
    ///
    /// As [`Storefront::dispatch`].
    pub fn handle_card(&mut self, action: CardAction, card: &ProductCard) -> Result<Outcome> {
        match StorefrontEvent::from_card(action, card) {
            Ok(event) => self.dispatch(event),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring card click");
                Ok(Outcome::none())
            }
        }
    }

    /// Handle one event.
    ///
    /// Shopper input errors are returned as `Ok` with an error notice.
    ///
    /// # Errors
    ///
    /// Returns `AppError` for storage or rendering failures.
    #[instrument(skip_all)]
    pub fn dispatch(&mut self, event: StorefrontEvent) -> Result<Outcome> {
        match self.apply(event) {
            Err(err) if err.is_user_error() => {
                tracing::debug!(error = %err, "Rejected input");
                Ok(Outcome::notice(err.notice()))
            }
            result => result,
        }
    }

    fn apply(&mut self, event: StorefrontEvent) -> Result<Outcome> {
        match event {
            StorefrontEvent::AddToCart(product) => {
                self.add_to_cart(product, 1)?;
                Ok(Outcome::navigate(Page::Cart))
            }
            StorefrontEvent::ViewProduct(product) => self.view(&product),
            StorefrontEvent::GridClick { product, on_button } => {
                if on_button {
                    return Ok(Outcome::none());
                }
                self.view(&product)
            }
            StorefrontEvent::UpdateQuantity { id, delta } => {
                self.carts().update_quantity(&id, delta)?;
                Ok(Outcome::none())
            }
            StorefrontEvent::RemoveItem(id) => {
                self.carts().remove_item(&id)?;
                Ok(Outcome::none())
            }
            StorefrontEvent::BuyNow => {
                if !self.add_staged()? {
                    return Ok(Outcome::none());
                }
                Ok(Outcome::navigate(Page::Cart))
            }
            StorefrontEvent::AddOnly => {
                if !self.add_staged()? {
                    return Ok(Outcome::none());
                }
                Ok(Outcome::notice(Notice::info(ADDED_TO_CART)))
            }
            StorefrontEvent::Signup {
                email,
                password,
                confirm_password,
            } => {
                AuthService::new(&mut self.store).signup(&email, &password, &confirm_password)?;
                Ok(Outcome::navigate(Page::Login).with_notice(Notice::info(SIGNUP_SUCCESS)))
            }
            StorefrontEvent::Login { email, password } => {
                AuthService::new(&mut self.store).login(&email, &password)?;
                Ok(Outcome::navigate(Page::Home).with_notice(Notice::info(LOGIN_SUCCESS)))
            }
            StorefrontEvent::Logout => {
                AuthService::new(&mut self.store).logout()?;
                Ok(Outcome::none())
            }
            StorefrontEvent::SubmitPayment(details) => {
                submit_payment(&mut self.store, Some(&mut self.badge), &details)?;
                Ok(Outcome::navigate(Page::Home).with_notice(Notice::info(PAYMENT_SUCCESS)))
            }
        }
    }

    fn view(&mut self, product: &Product) -> Result<Outcome> {
        selection::stage_selection(&mut self.store, product)?;
        Ok(Outcome::navigate(Page::Product))
    }

    /// Add one unit of the staged product. Returns `false` if nothing is
    /// staged.
    fn add_staged(&mut self) -> Result<bool> {
        let Some(product) = self.staged_product() else {
            tracing::debug!("No staged product");
            return Ok(false);
        };
        self.add_to_cart(product, 1)?;
        Ok(true)
    }
}
