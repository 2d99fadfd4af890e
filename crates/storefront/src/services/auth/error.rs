//! Authentication error types.
//!
//! Display strings are shown to the shopper verbatim as blocking notices.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during demo signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login submitted with a blank email or password.
    #[error("Enter details")]
    MissingCredentials,

    /// Signup submitted with a blank field.
    #[error("Fill all fields")]
    MissingFields,

    /// Signup password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Invalid email format.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] shopfront_core::EmailError),

    /// An account with this email already exists.
    #[error("Email exists. Login.")]
    UserAlreadyExists,

    /// No account matches the email and password.
    #[error("Invalid credentials. Please sign up.")]
    InvalidCredentials,

    /// Persisting account state failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
