//! Cart engine.
//!
//! [`CartService`] reads the cart from the injected store, applies one
//! mutation, and writes the whole cart back before returning. Every write to
//! the cart key is reported to the attached [`CartObserver`] so badge
//! displays stay in sync.

use tracing::instrument;

use shopfront_core::{Product, ProductId};

use crate::models::cart::Cart;
use crate::store::{KeyValueStore, StoreError, StoreExt, keys};

/// Notified after every write to the cart key.
pub trait CartObserver {
    /// Called with the cart exactly as persisted.
    fn cart_saved(&mut self, cart: &Cart);
}

/// Cart operations over a [`KeyValueStore`].
pub struct CartService<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
    observer: Option<&'a mut dyn CartObserver>,
}

impl<'a, S: KeyValueStore + ?Sized> CartService<'a, S> {
    /// Create a cart service over `store`.
    #[must_use]
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            observer: None,
        }
    }

    /// Attach an observer that is told about every cart write.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a mut dyn CartObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Read the current cart.
    ///
    /// Missing or corrupt data reads as an empty cart.
    #[must_use]
    pub fn get_cart(&self) -> Cart {
        self.store.load(keys::CART_ITEMS)
    }

    /// Add `quantity` units of `product` and persist.
    ///
    /// Adding zero units leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        if cart.add(product, quantity) {
            self.save_cart(&cart)?;
            tracing::debug!(items = cart.item_count(), "Added to cart");
        }
        Ok(cart)
    }

    /// Change the quantity of the line for `id` by `delta` and persist.
    ///
    /// A quantity that would drop to zero or below removes the line. Unknown
    /// ids leave the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        match cart.update_quantity(id, delta) {
            Some(quantity) => {
                self.save_cart(&cart)?;
                tracing::debug!(quantity, "Updated cart line");
            }
            None => tracing::debug!("No cart line to update"),
        }
        Ok(cart)
    }

    /// Remove the line for `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        if cart.remove(id) {
            self.save_cart(&cart)?;
        }
        Ok(cart)
    }

    /// Delete the cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart key cannot be removed.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StoreError> {
        self.store.remove(keys::CART_ITEMS)?;
        self.notify(&Cart::new());
        tracing::info!("Cart cleared");
        Ok(())
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.get_cart().item_count()
    }

    fn save_cart(&mut self, cart: &Cart) -> Result<(), StoreError> {
        self.store.save(keys::CART_ITEMS, cart)?;
        self.notify(cart);
        Ok(())
    }

    fn notify(&mut self, cart: &Cart) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.cart_saved(cart);
        }
    }
}
