//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types every Shopfront component agrees on:
//! - `storefront` - Cart engine, catalog, renderers and demo flows
//! - `cli` - Command-line driver over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no storage, no rendering, no I/O.
//! Values here are what gets persisted under the storefront's store keys,
//! so their serde shape is part of the storage contract.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, emails and the product record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
