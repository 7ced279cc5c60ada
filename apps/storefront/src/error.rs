//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function  → Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError (admin form) ──────┐                       │
//! │         ├── CoreError (unknown id, empty cart) ─┤                       │
//! │         └── BackendError { kind, message } ─────┤                       │
//! │                                                 ▼                       │
//! │                                   ApiError { code, message }            │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                         Notification { "Error", message, Error }        │
//! │                                                                         │
//! │  Backend messages pass through unchanged so the shopper sees exactly   │
//! │  what the backend reported.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use pedal_core::{BackendError, BackendErrorKind, CoreError, Notification, ValidationError};

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: fx-01"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed (admin form)
    ValidationError,

    /// No signed-in user, or sign-in rejected
    Unauthenticated,

    /// A backend constraint was violated
    Conflict,

    /// The backend could not be reached
    Unavailable,

    /// Checkout requested with an empty cart
    EmptyCart,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthenticated, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The error notification shown for this failure.
    pub fn to_notification(&self) -> Notification {
        Notification::error(self.message.clone())
    }
}

/// Backend failures keep their message verbatim.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        let code = match err.kind {
            BackendErrorKind::Unauthenticated => ErrorCode::Unauthenticated,
            BackendErrorKind::NotFound => ErrorCode::NotFound,
            BackendErrorKind::Constraint => ErrorCode::Conflict,
            BackendErrorKind::Unavailable => ErrorCode::Unavailable,
            BackendErrorKind::Internal => ErrorCode::Internal,
        };
        ApiError::new(code, err.message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Cart is empty"),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
