//! User domain types.

use serde::{Deserialize, Serialize};

use shopfront_core::Email;

/// A demo storefront account.
///
/// The password is kept in plaintext. Accounts exist only to exercise the
/// login and signup pages; they protect nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Normalized (trimmed, lowercased) email, unique across accounts.
    pub email: Email,
    /// Plaintext password, trimmed.
    pub password: String,
}

impl User {
    /// Whether `password` matches this account's password exactly.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}
