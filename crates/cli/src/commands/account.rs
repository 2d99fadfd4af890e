//! Demo account commands.

use std::io::{self, Write};

use shopfront_storefront::StorefrontEvent;
use shopfront_storefront::config::StorefrontConfig;

use super::{open_storefront, report};

/// Create a demo account.
///
/// # Errors
///
/// Returns an error if the store fails. Rejected input is reported, not
/// returned.
pub fn signup(
    config: &StorefrontConfig,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    let outcome = shop.dispatch(StorefrontEvent::Signup {
        email,
        password,
        confirm_password,
    })?;
    report(&outcome)?;
    Ok(())
}

/// Log in to a demo account.
///
/// # Errors
///
/// Returns an error if the store fails. Rejected input is reported, not
/// returned.
pub fn login(
    config: &StorefrontConfig,
    email: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    let outcome = shop.dispatch(StorefrontEvent::Login { email, password })?;
    report(&outcome)?;
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn logout(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    shop.dispatch(StorefrontEvent::Logout)?;
    writeln!(io::stdout().lock(), "Logged out.")?;
    Ok(())
}

/// Print the logged-in email.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output fails.
pub fn whoami(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    let mut out = io::stdout().lock();
    match shop.logged_in_user() {
        Some(email) => writeln!(out, "{email}")?,
        None => writeln!(out, "Not logged in.")?,
    }
    Ok(())
}
