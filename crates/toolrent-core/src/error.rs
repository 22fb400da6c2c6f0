//! # Error Types
//!
//! Domain-specific error types for toolrent-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  toolrent-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── RouteError       - Tool identifier could not be resolved          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError/RouteError → CoreError → ApiError → Frontend    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment failures are not errors of this crate: they are outcomes reported
//! by the payment collaborator and normalised in [`crate::payment`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The route did not yield a usable tool identifier.
    #[error("Tool not found: {0}")]
    ToolNotFound(#[from] RouteError),

    /// Payment request could not be built.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Route Error
// =============================================================================

/// Why a route-provided tool identifier could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No identifier segment at all.
    #[error("tool identifier is missing")]
    Missing,

    /// Decoded to an empty or whitespace-only name.
    #[error("tool identifier is blank")]
    Blank,

    /// A `%` not followed by two hex digits.
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },

    /// Escapes decoded to bytes that are not UTF-8.
    #[error("tool identifier is not valid UTF-8 after decoding")]
    InvalidUtf8,

    /// Decoded, but not an acceptable tool name.
    #[error("invalid tool identifier: {0}")]
    Invalid(ValidationError),

    /// The route parameters could not be obtained at all.
    #[error("route parameters unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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
    fn test_route_error_messages() {
        assert_eq!(RouteError::Blank.to_string(), "tool identifier is blank");
        assert_eq!(
            RouteError::MalformedEscape { position: 5 }.to_string(),
            "malformed percent escape at byte 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::TooLong {
            field: "tool name".to_string(),
            max: 120,
        };
        assert_eq!(err.to_string(), "tool name must be at most 120 characters");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = RouteError::Missing.into();
        assert!(matches!(core_err, CoreError::ToolNotFound(RouteError::Missing)));
        assert_eq!(core_err.to_string(), "Tool not found: tool identifier is missing");

        let core_err: CoreError = ValidationError::Required {
            field: "duration".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
