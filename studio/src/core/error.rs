//! # Common Error Types
//!
//! Consolidated error handling for the studio client.
//!
//! This module provides a centralized error type [`AppError`] that covers all error
//! scenarios in the client.
//!
//! ## Error Categories
//!
//! - **AuthRequired**: an action needs a signed-in session and none exists
//! - **Network**: the backend could not be reached
//! - **Api**: the backend answered with a non-success status
//! - **Upload**: the source face could not be read or uploaded
//! - **PaymentInit / PaymentVerification**: checkout session, order or verification failures
//! - **NotFound**: a template or task does not exist
//! - **Validation**: local input checks
//! - **Config**: invalid configuration
//!
//! ## Propagation
//!
//! Errors are caught at the UI action that started the operation and surfaced
//! inline or as a toast. None are retried automatically. Status polling is the only
//! place where errors are swallowed, see [`crate::app::workflow`].
//!
//! ```rust
//! use studio::core::error::AppError;
//!
//! let err = AppError::Api("Insufficient gems".to_string());
//! assert_eq!(err.to_string(), "Insufficient gems");
//! assert_eq!(AppError::AuthRequired.to_string(), "Please sign in first");
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// All variants carry plain strings so errors can travel inside [`crate::app::AppEvent`]
/// and be compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No session token is available for an authenticated call.
    #[error("Please sign in first")]
    AuthRequired,

    /// Connection refused, DNS failure, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status. The message is the backend's `detail` when present.
    #[error("{0}")]
    Api(String),

    /// Source file could not be read or the upload was rejected.
    #[error("{0}")]
    Upload(String),

    /// Checkout session or provider order could not be created.
    #[error("Failed to start payment: {0}")]
    PaymentInit(String),

    /// The provider completion did not verify.
    #[error("Payment verification failed: {0}")]
    PaymentVerification(String),

    /// Missing template or task (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// Local input validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration file or environment.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message shown to the user without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthRequired => self.to_string(),
            AppError::Network(msg)
            | AppError::Api(msg)
            | AppError::Upload(msg)
            | AppError::PaymentInit(msg)
            | AppError::PaymentVerification(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Config(msg) => msg.clone(),
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Api(format!("Failed to parse response: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(format!("Failed to parse response: {}", err))
    }
}
