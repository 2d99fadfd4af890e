//! Catalog browsing.

use std::io::{self, Write};

use shopfront_core::Category;
use shopfront_storefront::StorefrontEvent;
use shopfront_storefront::catalog::attrs;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::render;
use shopfront_storefront::routes::Page;

use super::{find_product, load_catalog, open_storefront, report};

/// List catalog products.
///
/// The category filter runs first and the search second. As on the home
/// page, a search replaces the filter's result rather than narrowing it.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn list(
    config: &StorefrontConfig,
    category: Option<&str>,
    search: Option<&str>,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(config)?;
    let mut grid = catalog.grid();

    if let Some(category) = category {
        grid.apply_category_filter(category);
    }
    if let Some(query) = search {
        grid.apply_search(query);
    }

    let mut out = io::stdout().lock();
    if html {
        writeln!(out, "{}", render::render_product_grid(&grid, Page::Home)?)?;
        writeln!(out, "{}", render::render_footer(Page::Home)?)?;
        return Ok(());
    }

    let mut shown = 0;
    for card in grid.visible() {
        let field = |name| card.attr(name).unwrap_or_default();
        writeln!(
            out,
            "{:<6} {:<24} ${:>8}  [{}]",
            field(attrs::ID),
            field(attrs::NAME),
            field(attrs::PRICE),
            field(attrs::CATEGORY),
        )?;
        shown += 1;
    }
    if shown == 0 {
        let categories: Vec<&str> = catalog
            .categories()
            .into_iter()
            .map(Category::as_str)
            .collect();
        writeln!(
            out,
            "No products match. Categories: {}",
            categories.join(", ")
        )?;
    }

    tracing::debug!(shown, "Listed catalog");
    Ok(())
}

/// Stage a product and show its detail page.
///
/// # Errors
///
/// Returns an error if the product is unknown or the store fails.
pub fn view(
    config: &StorefrontConfig,
    id: &str,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = find_product(&load_catalog(config)?, id)?;
    let mut shop = open_storefront(config)?;

    let outcome = shop.dispatch(StorefrontEvent::ViewProduct(product))?;

    if html {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", shop.product_page()?)?;
        writeln!(out, "{}", render::render_footer(Page::Product)?)?;
        return Ok(());
    }

    if let Some(product) = shop.staged_product() {
        let mut out = io::stdout().lock();
        writeln!(out, "{} (${})", product.name, product.price)?;
        if !product.description.is_empty() {
            writeln!(out, "{}", product.description)?;
        }
        writeln!(out, "category: {}", product.category)?;
    }
    report(&outcome)?;
    Ok(())
}
