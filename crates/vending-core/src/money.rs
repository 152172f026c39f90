//! # Money Module
//!
//! Provides the `Money` type for prices, coin face values and change totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COIN ARITHMETIC IS EXACT                                               │
//! │                                                                         │
//! │  Floating point:  0.1 + 0.2 = 0.30000000000000004  ❌                   │
//! │                                                                         │
//! │  Integer cents:   10 + 20 = 30                     ✅                   │
//! │                                                                         │
//! │  Every coin has a whole-cent face value, every price is whole cents,   │
//! │  so change computation never needs rounding.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::money::Money;
//!
//! let price = Money::from_cents(120); // €1.20
//! let paid = Money::from_cents(200);
//! assert_eq!((paid - price).cents(), 80);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: prices arrive from callers as signed cents and are
///   validated, intermediate differences may go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let price = Money::from_cents(150);
    /// assert_eq!(price.cents(), 150);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// How many whole units of `unit` fit into this amount.
    ///
    /// Returns 0 for a non-positive unit or a non-positive amount.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let remaining = Money::from_cents(80);
    /// assert_eq!(remaining.fits(Money::from_cents(50)), 1);
    /// assert_eq!(remaining.fits(Money::from_cents(20)), 4);
    /// assert_eq!(remaining.fits(Money::from_cents(200)), 0);
    /// ```
    pub fn fits(&self, unit: Money) -> u32 {
        if unit.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        u32::try_from(self.0 / unit.0).unwrap_or(u32::MAX)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as euros, e.g. `€1.20`.
///
/// ## Note
/// This is for logs and error messages. Kiosk frontends format for display
/// themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.euros().abs(), self.cents_part())
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a coin count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Money(self.0 * i64::from(count))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        assert_eq!(money.euros(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(120)), "€1.20");
        assert_eq!(format!("{}", Money::from_cents(10)), "€0.10");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-€5.50");
        assert_eq!(format!("{}", Money::zero()), "€0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(200);
        let b = Money::from_cents(120);

        assert_eq!((a + b).cents(), 320);
        assert_eq!((a - b).cents(), 80);
        assert_eq!((b * 3).cents(), 360);
    }

    #[test]
    fn test_sum() {
        let total: Money = [50, 20, 10].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 80);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_fits() {
        let remaining = Money::from_cents(30);
        assert_eq!(remaining.fits(Money::from_cents(20)), 1);
        assert_eq!(remaining.fits(Money::from_cents(10)), 3);
        assert_eq!(Money::zero().fits(Money::from_cents(10)), 0);
        assert_eq!(remaining.fits(Money::zero()), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-1);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }
}
