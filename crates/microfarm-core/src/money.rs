//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer currency units                               │
//! │    The whole catalog is priced in whole rubles, so Money is a       │
//! │    plain i64 and every calculation (including the bulk discount)    │
//! │    is exact integer math with explicit rounding.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use microfarm_core::money::Money;
//!
//! let base = Money::from_units(1500);
//! let with_light = base + Money::from_units(1200); // 2700 ₽
//! let quad = with_light * 4;                       // 10800 ₽
//! assert_eq!(quad.apply_percentage_discount(1000).units(), 9720);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units (rubles).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for refunds and struck prices
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare number**: persisted records keep the plain
///   `price: number` shape the frontend expects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use microfarm_core::money::Money;
    ///
    /// let unit_price = Money::from_units(150);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 450);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted amount,
    /// rounded to the nearest whole unit (half away from zero).
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Rounding
    /// The result is `round(amount × (1 − discount))`, not
    /// `amount − round(discount)` - the two differ by one unit on odd
    /// amounts, and the engine's contract is rounding the discounted
    /// total.
    ///
    /// ## Example
    /// ```rust
    /// use microfarm_core::money::Money;
    ///
    /// // 15 × 0.9 = 13.5 → 14
    /// assert_eq!(Money::from_units(15).apply_percentage_discount(1000).units(), 14);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let keep_bps = 10_000u32.saturating_sub(discount_bps) as i128;
        // i128 to prevent overflow on large amounts
        let scaled = self.0 as i128 * keep_bps;
        let rounded = if scaled >= 0 {
            (scaled + 5_000) / 10_000
        } else {
            (scaled - 5_000) / 10_000
        };
        Money(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.0)
    }
}

/// Default money is zero.
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
