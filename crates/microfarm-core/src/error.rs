//! # Error Types
//!
//! Domain-specific error types for microfarm-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  microfarm-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  microfarm-store errors (separate crate)                            │
//! │  └── StoreError       - Persistence failures (quota, I/O)           │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → UI message        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, field names)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. Per the engine's
/// error-handling model they are rejected at the mutation boundary with
/// state unchanged - none of them is fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A variant id was given that the product does not define.
    #[error("Product {product_id} has no variant '{variant_id}'")]
    VariantNotFound {
        product_id: String,
        variant_id: String,
    },

    /// The product defines variants but no variant was selected.
    ///
    /// ## When This Occurs
    /// A cart line referencing a product with a variant list must carry a
    /// variant id that exists in that list.
    #[error("Product {product_id} requires a variant selection")]
    VariantRequired { product_id: String },

    /// A seed id was selected that is not part of the seed catalog.
    #[error("Unknown seed product: {0}")]
    UnknownSeed(String),

    /// Checkout was attempted on an empty cart.
    #[error("Cannot create an order from an empty cart")]
    EmptyCart,

    /// An order status transition outside the lifecycle was requested.
    ///
    /// ## When This Occurs
    /// - Skipping ahead on the happy path (pending → shipped)
    /// - Any transition out of delivered, cancelled or returned
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::VariantNotFound {
            product_id: "seed-001".to_string(),
            variant_id: "9kg".to_string(),
        };
        assert_eq!(err.to_string(), "Product seed-001 has no variant '9kg'");

        let err = CoreError::InvalidStatusTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Shipped,
        };
        assert_eq!(err.to_string(), "Order cannot move from delivered to shipped");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
