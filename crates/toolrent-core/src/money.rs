//! # Money Module
//!
//! Provides the `Money` type for handling rental prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A 1-day rental at ₹59/hr with 20% off:                                 │
//! │    1416 × 0.8 = 1132.8000000000002  ❌ in floating point                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    141600 paise - 28320 paise = 113280 paise  (₹1132.80 exactly)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use toolrent_core::money::Money;
//!
//! let hourly = Money::from_rupees(59);
//! let day = hourly * 24u32;
//! assert_eq!(day.paise(), 141_600);
//! assert_eq!(day.to_string(), "₹1416.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Paise per rupee.
const PAISE_PER_RUPEE: i64 = 100;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise).
///
/// ## Where Money Flows
/// ```text
/// ToolListing.hourly_rate ──► PriceBreakdown.base_price ──► discount ──► total
///                                                                         │
///                     CartLineItem.line_total() ◄── PaymentRequest.amount ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use toolrent_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(5900).rupees(), 59);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * PAISE_PER_RUPEE)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the
    /// nearest paisa.
    ///
    /// ## Rounding
    /// Integer math: `(amount * bps + 5000) / 10000`. The `+5000` is the
    /// half-paisa. Amounts are never negative on the rental path, so half-up
    /// and half-away-from-zero coincide.
    ///
    /// ```rust
    /// use toolrent_core::money::Money;
    ///
    /// // 20% of ₹1416.00 = ₹283.20
    /// assert_eq!(Money::from_rupees(1416).percentage(2000).paise(), 28_320);
    /// // 5% of 110 paise = 5.5 paise, rounded up to 6
    /// assert_eq!(Money::from_paise(110).percentage(500).paise(), 6);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + BPS_SCALE / 2) / BPS_SCALE;
        Money(part as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Adds two amounts, saturating at the `i64` bounds.
    ///
    /// Cart aggregates use this: quantities are unbounded, so a large enough
    /// cart would otherwise wrap negative.
    ///
    /// ```rust
    /// use toolrent_core::money::Money;
    ///
    /// let max = Money::from_paise(i64::MAX);
    /// assert_eq!(max.saturating_add(Money::from_paise(1)), max);
    /// ```
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `₹1132.80`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by an hour count or a quantity. Saturates.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: u32) -> Self {
        self.multiply_quantity(factor)
    }
}

/// Saturating sum.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees_and_parts() {
        let money = Money::from_rupees(59);
        assert_eq!(money.paise(), 5900);
        assert_eq!(money.rupees(), 59);
        assert_eq!(money.paise_part(), 0);

        let fractional = Money::from_paise(113_280);
        assert_eq!(fractional.rupees(), 1132);
        assert_eq!(fractional.paise_part(), 80);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(226_560).to_string(), "₹2265.60");
        assert_eq!(Money::from_rupees(59).to_string(), "₹59.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3u32).paise(), 3000);
        assert_eq!(a.multiply_quantity(2).paise(), 2000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_aggregates_saturate() {
        let max = Money::from_paise(i64::MAX);
        let week_line = Money::from_rupees(59).multiply_quantity(168);

        assert_eq!(week_line.multiply_quantity(u32::MAX).paise(), 991_200 * i64::from(u32::MAX));
        assert_eq!(max * 2u32, max);
        assert_eq!(max.saturating_add(week_line), max);

        let total: Money = std::iter::repeat(week_line.multiply_quantity(u32::MAX))
            .take(3_200)
            .sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_percentage_exact() {
        // 30% of a week at ₹59/hr
        let week = Money::from_rupees(59) * 168u32;
        assert_eq!(week.percentage(3000).paise(), 297_360);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5% of 10 paise = 0.5 paise → 1
        assert_eq!(Money::from_paise(10).percentage(500).paise(), 1);
        // 5% of 9 paise = 0.45 paise → 0
        assert_eq!(Money::from_paise(9).percentage(500).paise(), 0);
    }

    #[test]
    fn test_percentage_bounds() {
        let amount = Money::from_paise(12_345);
        assert!(amount.percentage(0).is_zero());
        assert_eq!(amount.percentage(10_000), amount);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_paise(1).is_positive());
        assert!(Money::from_paise(-1).is_negative());
    }
}
