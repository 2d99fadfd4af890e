//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart engine (add, update, remove, clear) with write notifications
//! - `auth` - Demo signup, login and logout
//! - `checkout` - Demo payment form; success clears the cart
//! - `selection` - Staged product for the detail page
//!
//! Each service borrows the store it operates on, so callers decide which
//! backend is used and tests can pass a `MemoryStore`.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod selection;

pub use auth::{AuthError, AuthService};
pub use cart::{CartObserver, CartService};
pub use checkout::{PaymentDetails, PaymentError, submit_payment};
