//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart engine behaviour through the storefront dispatcher
//! - `accounts_checkout` - Signup, login and demo payment flows
//! - `persistence` - File-backed store across reopen, storage format
//! - `browse` - Catalog grid, product pages and carousel autoplay
//!
//! Helpers here are shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use shopfront_core::{Price, Product};

/// A unique data directory under the system temp dir, removed on drop.
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Reserve a fresh directory path. The store creates it on open.
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("shopfront-it-{}", uuid::Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A product priced in cents.
#[must_use]
pub fn product(id: &str, name: &str, cents: u32) -> Product {
    Product::new(id, name, Price::from_cents(cents))
}
