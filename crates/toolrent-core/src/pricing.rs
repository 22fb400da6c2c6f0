//! # Pricing Calculator
//!
//! Turns an hourly rate, a duration and a quantity into a price breakdown.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_price       = hourly_rate × hour_multiplier                      │
//! │  discount_amount  = base_price × discount% (half-up to the paisa)      │
//! │  final_unit_price = base_price − discount_amount                       │
//! │  total            = final_unit_price × quantity                        │
//! │                                                                         │
//! │  Example: ₹59/hr, "1 Day" (×24, 20% off), quantity 2                   │
//! │    base ₹1416.00 → discount ₹283.20 → unit ₹1132.80 → total ₹2265.60   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One discount per line; discounts never stack.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::duration::DurationOption;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Quantity
// =============================================================================

/// A rental quantity, always at least 1.
///
/// Construction from raw input either rejects ([`Quantity::new`]) or clamps
/// ([`Quantity::clamped`]) values below 1. There is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "i64", into = "u32")]
#[ts(export)]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Quantity = Quantity(1);

    /// Validates a raw quantity.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw < 1 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        u32::try_from(raw)
            .map(Quantity)
            .map_err(|_| ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::from(u32::MAX),
            })
    }

    /// Clamps a raw quantity into `1..=u32::MAX`.
    pub fn clamped(raw: i64) -> Self {
        Quantity(raw.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// Applies a +/- step, never going below 1.
    ///
    /// ```rust
    /// use toolrent_core::pricing::Quantity;
    ///
    /// assert_eq!(Quantity::ONE.step(-1), Quantity::ONE);
    /// assert_eq!(Quantity::ONE.step(2).get(), 3);
    /// ```
    pub fn step(self, delta: i64) -> Self {
        Quantity::clamped(i64::from(self.0).saturating_add(delta))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Quantity::new(raw)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The computed price of one rental line.
///
/// ## Invariants
/// - `discount_amount <= base_price`
/// - `total >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub base_price: Money,
    /// Whole-percent discount that was applied (0 when none).
    pub discount_percent: u8,
    pub discount_amount: Money,
    pub final_unit_price: Money,
    pub quantity: Quantity,
    pub total: Money,
}

impl PriceBreakdown {
    /// Whether a discount line should be shown.
    #[inline]
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0
    }
}

/// Computes the breakdown for a catalog duration.
///
/// ```rust
/// use toolrent_core::duration;
/// use toolrent_core::money::Money;
/// use toolrent_core::pricing::{compute_breakdown, Quantity};
///
/// let day = duration::find("24").unwrap();
/// let quantity = Quantity::new(2).unwrap();
/// let breakdown = compute_breakdown(Money::from_rupees(59), day, quantity);
/// assert_eq!(breakdown.total.paise(), 226_560);
/// ```
pub fn compute_breakdown(
    hourly_rate: Money,
    duration: &DurationOption,
    quantity: Quantity,
) -> PriceBreakdown {
    compute_line(
        hourly_rate,
        duration.hour_multiplier,
        duration.discount_percent.unwrap_or(0),
        quantity,
    )
}

/// Computes a breakdown from raw snapshot values.
///
/// Cart lines carry their hours and discount as plain numbers, so totals
/// can be recomputed without the catalog.
pub fn compute_line(
    hourly_rate: Money,
    hours: u32,
    discount_percent: u8,
    quantity: Quantity,
) -> PriceBreakdown {
    let discount_percent = discount_percent.min(100);
    let base_price = hourly_rate * hours;
    let discount_amount = base_price.percentage(u32::from(discount_percent) * 100);
    let final_unit_price = base_price - discount_amount;

    PriceBreakdown {
        base_price,
        discount_percent,
        discount_amount,
        final_unit_price,
        quantity,
        total: final_unit_price.multiply_quantity(quantity.get()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
