//! Demo payment command.

use shopfront_storefront::StorefrontEvent;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::services::PaymentDetails;

use super::{open_storefront, report};

/// Submit the demo payment form.
///
/// # Errors
///
/// Returns an error if the store fails. An incomplete form is reported,
/// not returned.
pub fn pay(
    config: &StorefrontConfig,
    name: &str,
    number: &str,
    expiry: &str,
    cvv: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    let details = PaymentDetails::new(name, number, expiry, cvv);
    tracing::debug!(?details, "Submitting payment");

    let outcome = shop.dispatch(StorefrontEvent::SubmitPayment(details))?;
    report(&outcome)?;
    Ok(())
}
