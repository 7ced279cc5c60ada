//! # Error Types
//!
//! Domain-specific error types for pedal-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pedal-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Admin form input failures                      │
//! │                                                                         │
//! │  pedal-core backend contract (backend.rs)                              │
//! │  └── BackendError     - What any backend reports (message + kind)      │
//! │                                                                         │
//! │  pedal-db errors (separate crate)                                      │
//! │  └── DbError          - Database failures, converted to BackendError   │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the UI sees, forwarded to notifications   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart and the catalog filter never fail: unknown ids are no-ops and an
//! empty catalog filters to an empty list. The errors here come from the
//! operations around them (product lookup, checkout, admin input).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing the admin product form, before anything is sent to
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric field value is above the accepted ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Field value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Original price is below the selling price.
    #[error("original price must be at least the price")]
    OriginalBelowPrice,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("fx-01".to_string());
        assert_eq!(err.to_string(), "Product not found: fx-01");
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::OriginalBelowPrice;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
