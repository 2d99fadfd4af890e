//! Domain models for the storefront.
//!
//! These are the values persisted under the store keys in
//! [`crate::store::keys`]. Product types themselves live in `shopfront-core`.

pub mod cart;
pub mod user;

pub use cart::{Cart, CartLine, compute_total, count_items};
pub use user::User;
