//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that every "round to two
//! decimals" step in the engine is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of basis points in a whole (100%)
pub const BASIS_POINTS: i64 = 10_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use pocketplan::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use pocketplan::models::Money;
    /// assert_eq!(Money::from_units(1000).cents(), 100_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount as a floating point number of units, for ratios only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The larger of this amount and zero
    pub fn clamp_non_negative(&self) -> Self {
        Self(self.0.max(0))
    }

    /// Multiply by a share expressed in basis points, rounding half away
    /// from zero to the cent
    ///
    /// # Examples
    /// ```
    /// use pocketplan::models::Money;
    /// // 70% of 100.01 is 70.007, rounded to 70.01
    /// assert_eq!(Money::from_cents(10_001).share_bp(7_000).cents(), 7_001);
    /// ```
    pub fn share_bp(&self, basis_points: i64) -> Self {
        let product = self.0 as i128 * basis_points as i128;
        let half = BASIS_POINTS as i128 / 2;
        let rounded = if product >= 0 {
            (product + half) / BASIS_POINTS as i128
        } else {
            (product - half) / BASIS_POINTS as i128
        };
        Self(rounded as i64)
    }

    /// Scale by a floating point factor, rounding half away from zero to the cent
    pub fn scale(&self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    /// Round up (toward positive infinity) to a multiple of `step`
    ///
    /// A zero or negative step leaves the amount untouched.
    pub fn round_up_to(&self, step: Money) -> Self {
        if step.0 <= 0 {
            return *self;
        }
        let rem = self.0.rem_euclid(step.0);
        if rem == 0 {
            *self
        } else {
            Self(self.0 - rem + step.0)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s).replace(',', "");

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        let (units_str, cents_str) = match s.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (s.as_str(), ""),
        };

        // Sign only in front, at most two fractional digits
        if !digits(units_str) || !digits(cents_str) || cents_str.len() > 2 {
            return Err(invalid());
        }
        if units_str.is_empty() && cents_str.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_units() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_units(7000).cents(), 700_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((b - a).clamp_non_negative(), Money::zero());
    }

    #[test]
    fn test_share_bp_rounds_half_away_from_zero() {
        assert_eq!(Money::from_cents(3).share_bp(5_000).cents(), 2); // 1.5 -> 2
        assert_eq!(Money::from_cents(3).share_bp(3_000).cents(), 1); // 0.9 -> 1
        assert_eq!(Money::from_cents(1).share_bp(2_000).cents(), 0); // 0.2 -> 0
        assert_eq!(Money::from_cents(-3).share_bp(5_000).cents(), -2);
        assert_eq!(Money::from_units(10_000).share_bp(7_000), Money::from_units(7_000));
    }

    #[test]
    fn test_round_up_to() {
        let step = Money::from_units(100);
        assert_eq!(Money::from_units(1).round_up_to(step), Money::from_units(100));
        assert_eq!(Money::from_units(100).round_up_to(step), Money::from_units(100));
        assert_eq!(Money::from_cents(10_001).round_up_to(step), Money::from_units(200));
        assert_eq!(Money::zero().round_up_to(step), Money::zero());
        assert_eq!(Money::from_cents(-50).round_up_to(step), Money::zero());
        assert_eq!(Money::from_cents(42).round_up_to(Money::zero()).cents(), 42);
    }

    #[test]
    fn test_scale() {
        assert_eq!(Money::from_units(1000).scale(1.1), Money::from_units(1100));
        assert_eq!(Money::from_cents(5).scale(0.5).cents(), 3);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.03").unwrap().cents(), 3);
        assert_eq!(Money::parse(".03").unwrap().cents(), 3);
        assert_eq!(Money::parse("42,436.80").unwrap().cents(), 4_243_680);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_fractions() {
        assert!(Money::parse("1.€").is_err());
        assert!(Money::parse("1.-5").is_err());
        assert!(Money::parse("1.+5").is_err());
        assert!(Money::parse("1.999").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
