//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units                                            │
//! │    Rupiah prices are whole numbers (Rp 1.000.000), so the smallest      │
//! │    unit is one rupiah and every total is exact.                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pedal_core::money::Money;
//!
//! let price = Money::from_units(1_000_000);
//! let line_total = price * 2;
//! assert_eq!(line_total.to_string(), "Rp 2.000.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (whole rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (discounts) may be negative mid-calculation
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Newtype serialization**: the UI sees a plain number
///
/// ```text
/// Product.price ──┬──► CartItem.line_total ──► Cart.total ──► Checkout
///                 │
///                 └──► Displayed as "Rp 1.000.000" on the product card
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use pedal_core::money::Money;
    ///
    /// let price = Money::from_units(500_000);
    /// assert_eq!(price.units(), 500_000);
    /// ```
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

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ```rust
    /// use pedal_core::money::Money;
    ///
    /// let line_total = Money::from_units(150_000).multiply_quantity(3);
    /// assert_eq!(line_total.units(), 450_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Percentage saved relative to an original (pre-discount) price.
    ///
    /// Rounded to the nearest whole percent, halves away from zero, matching
    /// the badge shown on the product card. Returns 0 when there is no
    /// original price, when it is not higher than `self`, or when it is zero.
    ///
    /// ```rust
    /// use pedal_core::money::Money;
    ///
    /// let price = Money::from_units(850_000);
    /// assert_eq!(price.discount_percent_from(Some(Money::from_units(1_000_000))), 15);
    /// assert_eq!(price.discount_percent_from(None), 0);
    /// ```
    pub fn discount_percent_from(&self, original: Option<Money>) -> u32 {
        let Some(original) = original else {
            return 0;
        };
        if original.0 <= 0 || original.0 <= self.0 {
            return 0;
        }

        // (original - price) / original * 100, rounded half up in integer math
        let saved = (original.0 - self.0) as i128 * 100;
        let orig = original.0 as i128;
        ((saved * 2 + orig) / (orig * 2)) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount the way the `id-ID` locale formats IDR:
/// `Rp` prefix, `.` thousands separator, no decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, grouped)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
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
