//! Staged product selection.
//!
//! The grid stages the product a shopper clicked; the detail page reads it
//! back. Only one product is staged at a time.

use shopfront_core::Product;

use crate::store::{KeyValueStore, StoreError, StoreExt, keys};

/// Overwrite the staged selection with `product`.
///
/// # Errors
///
/// Returns `StoreError` if the selection cannot be written.
pub fn stage_selection<S: KeyValueStore + ?Sized>(
    store: &mut S,
    product: &Product,
) -> Result<(), StoreError> {
    store.save(keys::SELECTED_PRODUCT, product)?;
    tracing::debug!(product_id = %product.id, "Staged product selection");
    Ok(())
}

/// The staged product, or `None` before the first selection or if the
/// stored value is corrupt.
#[must_use]
pub fn staged_selection<S: KeyValueStore + ?Sized>(store: &S) -> Option<Product> {
    store.load_optional(keys::SELECTED_PRODUCT)
}
