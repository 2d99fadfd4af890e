//! Demo checkout.
//!
//! No payment is processed. A complete form "succeeds" and empties the cart.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use super::cart::{CartObserver, CartService};
use crate::store::{KeyValueStore, StoreError};

/// Message shown after a successful demo payment.
pub const PAYMENT_SUCCESS: &str = "Payment success (demo). Thank you!";

/// Errors from the payment form.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// At least one field was left blank.
    #[error("Fill payment details")]
    MissingDetails,

    /// Clearing the cart failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Payment form contents.
///
/// Implements `Debug` manually to redact the card number and CVV.
#[derive(Clone)]
pub struct PaymentDetails {
    /// Name on the card.
    pub card_name: String,
    /// Card number.
    pub card_number: SecretString,
    /// Expiry as typed (e.g. `12/29`).
    pub expiry: String,
    /// Card verification value.
    pub cvv: SecretString,
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl PaymentDetails {
    /// Build payment details from raw form values.
    #[must_use]
    pub fn new(
        card_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_name: card_name.into(),
            card_number: SecretString::from(card_number.into()),
            expiry: expiry.into(),
            cvv: SecretString::from(cvv.into()),
        }
    }

    /// Whether every field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.card_name.is_empty()
            && !self.card_number.expose_secret().is_empty()
            && !self.expiry.is_empty()
            && !self.cvv.expose_secret().is_empty()
    }
}

/// Validate the payment form and, on success, clear the cart.
///
/// # Errors
///
/// Returns `PaymentError::MissingDetails` if any field is blank; the cart is
/// left untouched. Returns `PaymentError::Store` if the cart cannot be cleared.
#[instrument(skip_all)]
pub fn submit_payment<S: KeyValueStore + ?Sized>(
    store: &mut S,
    observer: Option<&mut dyn CartObserver>,
    details: &PaymentDetails,
) -> Result<(), PaymentError> {
    if !details.is_complete() {
        return Err(PaymentError::MissingDetails);
    }

    let carts = CartService::new(store);
    let mut carts = match observer {
        Some(observer) => carts.with_observer(observer),
        None => carts,
    };
    carts.clear_cart()?;

    tracing::info!("Demo payment accepted");
    Ok(())
}
