//! Shopfront storefront library.
//!
//! A browser-style storefront with no backend: a persisted shopping cart,
//! catalog browsing with filter and search, a hero carousel, and demo
//! login, signup and payment flows. All state lives in a [`store`] of
//! named JSON values.
//!
//! # Modules
//!
//! - [`store`] - key-value persistence (`MemoryStore`, `JsonFileStore`)
//! - [`models`] - cart and user records
//! - [`services`] - cart engine, accounts, checkout, staged selection
//! - [`catalog`] - product cards, card extraction, grid filter and search
//! - [`render`] - askama page renderers
//! - [`carousel`] - slide state and autoplay timer
//! - [`routes`] - page paths and relative links
//! - [`app`] - event dispatcher tying it together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod store;

pub use app::{CardAction, Outcome, Storefront, StorefrontEvent};
pub use config::StorefrontConfig;
pub use error::{AppError, Notice, NoticeKind};
