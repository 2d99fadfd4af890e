//! Command implementations.
//!
//! Each command opens the file-backed storefront from configuration, runs
//! one operation and prints the result to stdout.

pub mod account;
pub mod carousel;
pub mod cart;
pub mod catalog;
pub mod checkout;

use std::io::{self, Write};

use thiserror::Error;

use shopfront_core::Product;
use shopfront_storefront::catalog::{Catalog, CatalogError};
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::store::{JsonFileStore, StoreError};
use shopfront_storefront::{AppError, NoticeKind, Outcome, Storefront};

/// Errors specific to the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("A carousel needs at least one slide")]
    NoSlides,
}

/// Open the storefront over the configured data directory.
pub fn open_storefront(config: &StorefrontConfig) -> Result<Storefront<JsonFileStore>, StoreError> {
    let store = JsonFileStore::open(&config.data_dir)?;
    Ok(Storefront::new(store))
}

/// Load the configured catalog, or the built-in one.
pub fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, CatalogError> {
    config
        .catalog_path
        .as_deref()
        .map_or_else(Catalog::builtin, Catalog::from_path)
}

/// Look a product up in the catalog.
pub fn find_product(catalog: &Catalog, id: &str) -> Result<Product, AppError> {
    catalog
        .get(&id.into())
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Print an outcome's notice and destination.
pub fn report(outcome: &Outcome) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if let Some(notice) = &outcome.notice {
        match notice.kind {
            NoticeKind::Info => writeln!(out, "{notice}")?,
            NoticeKind::Error => writeln!(out, "error: {notice}")?,
        }
    }
    if let Some(page) = outcome.navigate {
        writeln!(out, "-> {page}")?;
    }
    Ok(())
}
