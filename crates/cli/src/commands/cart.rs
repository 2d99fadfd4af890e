//! Cart commands.

use std::io::{self, Write};

use shopfront_core::format_amount;
use shopfront_storefront::StorefrontEvent;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::render::render_footer;
use shopfront_storefront::routes::Page;

use super::{find_product, load_catalog, open_storefront};

/// Print the cart lines, total and badge count.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output fails.
pub fn show(config: &StorefrontConfig, html: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    let mut out = io::stdout().lock();

    if html {
        let page = shop.cart_page()?;
        writeln!(out, "{}", page.items_html)?;
        writeln!(out, "<span id=\"total-amount\">{}</span>", page.total)?;
        writeln!(out, "{}", render_footer(Page::Cart)?)?;
        return Ok(());
    }

    let cart = shop.cart();
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
    }
    for line in cart.lines() {
        writeln!(
            out,
            "{:<6} {:<24} {:>3} x ${:>8} = ${:>9}",
            line.id().as_str(),
            line.product.name,
            line.quantity,
            line.product.price.to_string(),
            format_amount(line.line_total()),
        )?;
    }
    writeln!(out, "Total: ${}", format_amount(cart.total()))?;
    writeln!(out, "Items: {}", shop.badge_count())?;
    Ok(())
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if the product is unknown or the store fails.
pub fn add(config: &StorefrontConfig, id: &str, qty: u32) -> Result<(), Box<dyn std::error::Error>> {
    let product = find_product(&load_catalog(config)?, id)?;
    let mut shop = open_storefront(config)?;

    let cart = shop.add_to_cart(product, qty)?;
    writeln!(
        io::stdout().lock(),
        "Cart: {} items, total ${}",
        shop.badge_count(),
        format_amount(cart.total())
    )?;
    Ok(())
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn update(
    config: &StorefrontConfig,
    id: &str,
    delta: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    shop.dispatch(StorefrontEvent::UpdateQuantity {
        id: id.into(),
        delta,
    })?;

    let quantity = shop.cart().line(&id.into()).map_or(0, |line| line.quantity);
    writeln!(io::stdout().lock(), "{id}: {quantity}")?;
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn remove(config: &StorefrontConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    shop.dispatch(StorefrontEvent::RemoveItem(id.into()))?;
    writeln!(io::stdout().lock(), "Items: {}", shop.badge_count())?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn clear(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = open_storefront(config)?;
    shop.clear_cart()?;
    writeln!(io::stdout().lock(), "Cart cleared.")?;
    Ok(())
}
