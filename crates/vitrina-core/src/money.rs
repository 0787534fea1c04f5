//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    19990.0 * 0.75 = 14992.499999999998  ❌ rounds to 14992.49          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    1_999_000 cents * 7_500 bps / 10_000 = 1_499_250 cents              │
//! │    = $14992.50 exactly                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrina_core::money::Money;
//! use vitrina_core::types::DiscountRate;
//!
//! let list_price = Money::from_major_minor(19990, 0);
//! let final_price = list_price.apply_discount(DiscountRate::from_bps(2500));
//! assert_eq!(final_price.cents(), 1_499_250);
//! assert_eq!(final_price.to_string(), "$14992.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount above 100% yields a negative price rather
///   than a panic
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  products.list_price_cents ──► ProductAttributes.list_price            │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                 apply_percentage(best P% benefit)                       │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                         RankedOffer.final_price                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vitrina_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Applies a percentage discount and returns the resulting price.
    ///
    /// ## Rounding
    /// The result is rounded half-up to whole cents on the *final* price,
    /// i.e. `round(price * (1 - pct / 100), 2)`:
    /// ```text
    /// price_cents * (10_000 - bps)      → exact product in 1/10_000 cents
    ///        + 5_000                    → half-up
    ///        / 10_000                   → whole cents
    /// ```
    /// Negative intermediate values round half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use vitrina_core::money::Money;
    /// use vitrina_core::types::DiscountRate;
    ///
    /// let price = Money::from_cents(1001); // $10.01
    /// let discounted = price.apply_discount(DiscountRate::from_bps(5000));
    /// // $10.01 × 50% = $5.005 → $5.01
    /// assert_eq!(discounted.cents(), 501);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        self.scale_round(10_000 - rate.bps() as i128, 10_000)
    }

    /// Applies a percentage discount given as a raw percentage (`12.345`).
    ///
    /// The percentage is kept to millionths of a percent, so benefits with
    /// more decimals than a basis point still price exactly; rounding to
    /// cents happens once, on the final price. Non-finite or negative
    /// percentages are treated as zero.
    ///
    /// ```rust
    /// use vitrina_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10_000, 0);
    /// assert_eq!(price.apply_percentage(12.345).cents(), 876_550);
    /// ```
    pub fn apply_percentage(&self, pct: f64) -> Money {
        let micro = if pct.is_finite() && pct > 0.0 {
            (pct * PERCENT_SCALE as f64).round() as i128
        } else {
            0
        };
        let whole = 100 * PERCENT_SCALE;
        self.scale_round(whole - micro, whole)
    }

    /// `self * numerator / denominator`, rounded half away from zero.
    fn scale_round(&self, numerator: i128, denominator: i128) -> Money {
        // i128 keeps large catalog prices from overflowing
        let scaled = self.0 as i128 * numerator;
        let half = denominator / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / denominator
        } else {
            (scaled - half) / denominator
        };
        Money::from_cents(rounded as i64)
    }
}

/// Fractional steps kept per percentage point by [`Money::apply_percentage`].
const PERCENT_SCALE: i128 = 1_000_000;

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$<major>.<minor>` (debugging / logs only).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(19990, 0).cents(), 1_999_000);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1_499_250).to_string(), "$14992.50");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_discount_quarter_off() {
        let list = Money::from_major_minor(19990, 0);
        let result = list.apply_discount(DiscountRate::from_bps(2500));
        assert_eq!(result.cents(), 1_499_250);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 0.05 × 50% = 0.025 → 0.03
        let price = Money::from_cents(5);
        assert_eq!(price.apply_discount(DiscountRate::from_bps(5000)).cents(), 3);
        // 0.01 × 30% off = 0.007 → 0.01
        let price = Money::from_cents(1);
        assert_eq!(price.apply_discount(DiscountRate::from_bps(3000)).cents(), 1);
    }

    #[test]
    fn test_discount_fractional_percentage() {
        // 12.5% off 100.00 = 87.50
        let price = Money::from_major_minor(100, 0);
        assert_eq!(price.apply_discount(DiscountRate::from_bps(1250)).cents(), 8750);
    }

    #[test]
    fn test_discount_above_hundred_percent_goes_negative() {
        let price = Money::from_major_minor(10, 0);
        assert_eq!(price.apply_discount(DiscountRate::from_bps(15_000)).cents(), -500);
    }

    #[test]
    fn test_percentage_keeps_sub_basis_point_precision() {
        // 10000.00 × (1 - 12.345%) = 8765.50
        let price = Money::from_major_minor(10_000, 0);
        assert_eq!(price.apply_percentage(12.345).cents(), 876_550);

        // 19990.00 × 75% = 14992.50, same as the basis point path
        let price = Money::from_major_minor(19_990, 0);
        assert_eq!(
            price.apply_percentage(25.0),
            price.apply_discount(DiscountRate::from_bps(2500))
        );
    }

    #[test]
    fn test_percentage_rounds_once_half_up() {
        // 10.01 × (1 - 0.005%) = 10.0094995 → 10.01
        let price = Money::from_cents(1001);
        assert_eq!(price.apply_percentage(0.005).cents(), 1001);
        // 0.01 × 50% = 0.005 → 0.01
        assert_eq!(Money::from_cents(1).apply_percentage(50.0).cents(), 1);
    }

    #[test]
    fn test_percentage_ignores_unusable_input() {
        let price = Money::from_cents(12_345);
        assert_eq!(price.apply_percentage(f64::NAN), price);
        assert_eq!(price.apply_percentage(-5.0), price);
    }

    #[test]
    fn test_zero_discount_is_identity() {
        let price = Money::from_cents(12_345);
        assert_eq!(price.apply_discount(DiscountRate::zero()), price);
    }
}
