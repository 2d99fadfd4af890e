//! Unified error handling.
//!
//! Provides a unified `AppError` type for storefront operations. Nothing in
//! the storefront is fatal: [`AppError::notice`] turns any error into the
//! blocking message shown to the shopper, logging internal failures first.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::services::auth::AuthError;
use crate::services::checkout::PaymentError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Catalog could not be loaded or a card was unusable.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Signup or login was rejected.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Payment form was rejected.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the error comes from shopper input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Auth(AuthError::Store(_)) | Self::Payment(PaymentError::Store(_)) => false,
            Self::Auth(_) | Self::Payment(_) | Self::NotFound(_) => true,
            Self::Store(_) | Self::Catalog(_) | Self::Render(_) => false,
        }
    }

    /// The message to show the shopper.
    ///
    /// Input errors show their own text. Internal errors are logged and
    /// shown as a generic message.
    #[must_use]
    pub fn notice(&self) -> Notice {
        if self.is_user_error() {
            let message = match self {
                Self::Auth(err) => err.to_string(),
                Self::Payment(err) => err.to_string(),
                _ => self.to_string(),
            };
            return Notice::error(message);
        }

        tracing::error!(error = %self, "Storefront error");
        Notice::error("Something went wrong. Please try again.")
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Kind of shopper-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
