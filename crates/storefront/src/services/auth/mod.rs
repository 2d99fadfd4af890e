//! Authentication service.
//!
//! Demo-only email/password accounts kept in the `users` store key. Passwords
//! are compared in plaintext; nothing here is a security boundary.

mod error;

pub use error::AuthError;

use tracing::instrument;

use shopfront_core::Email;

use crate::models::user::User;
use crate::store::{KeyValueStore, StoreExt, keys};

/// Authentication service.
///
/// Handles signup, login and logout over the injected store.
pub struct AuthService<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// Inputs are trimmed and the email is lowercased before any check.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, password, confirm_password))]
    pub fn signup(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, AuthError> {
        let password = password.trim();
        let confirm_password = confirm_password.trim();

        if email.trim().is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let email = Email::parse(email)?;

        let mut users = self.users();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User {
            email,
            password: password.to_owned(),
        };
        users.push(user.clone());
        self.store.save(keys::USERS, &users)?;

        tracing::info!(email = %user.email, "Account created");
        Ok(user)
    }

    /// Log in with email and password and remember the logged-in email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<Email, AuthError> {
        let password = password.trim();
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // A malformed email can't belong to any account
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let found = self
            .users()
            .into_iter()
            .any(|u| u.email == email && u.password_matches(password));
        if !found {
            tracing::debug!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.store.save(keys::LOGGED_IN_USER, &email)?;
        tracing::info!(email = %email, "Logged in");
        Ok(email)
    }

    /// Forget the logged-in email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the key cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(keys::LOGGED_IN_USER)?;
        Ok(())
    }

    /// The email of the last successful login, if any.
    #[must_use]
    pub fn logged_in_user(&self) -> Option<Email> {
        self.store.load_optional(keys::LOGGED_IN_USER)
    }

    /// All registered accounts. Corrupt data reads as no accounts.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.store.load(keys::USERS)
    }
}
