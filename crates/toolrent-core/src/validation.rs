//! # Validation Module
//!
//! Input validation for values that cross the HTTP boundary.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Frontend                                                      │
//! │  └── Duration buttons and +/- controls only offer valid values          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront handler                                           │
//! │  ├── Type validation (deserialization, Quantity >= 1)                  │
//! │  └── THIS MODULE: names and payment amounts                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest tool name accepted from a route.
pub const MAX_TOOL_NAME_LEN: usize = 120;

/// Validates a decoded tool name.
///
/// ## Rules
/// - Must not be blank
/// - At most 120 characters
///
/// ```rust
/// use toolrent_core::validation::validate_tool_name;
///
/// assert!(validate_tool_name("Adobe Photoshop").is_ok());
/// assert!(validate_tool_name("   ").is_err());
/// ```
pub fn validate_tool_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "tool name".to_string(),
        });
    }

    if name.chars().count() > MAX_TOOL_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "tool name".to_string(),
            max: MAX_TOOL_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tool_name() {
        assert!(validate_tool_name("Figma Pro").is_ok());
        assert!(validate_tool_name(&"é".repeat(MAX_TOOL_NAME_LEN)).is_ok());

        assert!(validate_tool_name("").is_err());
        assert!(validate_tool_name(" \t").is_err());
        assert_eq!(
            validate_tool_name(&"a".repeat(MAX_TOOL_NAME_LEN + 1)),
            Err(ValidationError::TooLong {
                field: "tool name".to_string(),
                max: MAX_TOOL_NAME_LEN,
            })
        );
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_rupees(59)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_paise(-1)).is_err());
    }
}
