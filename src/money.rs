//! Fixed-point money stored as a whole number of euro cents.
//!
//! Amounts only become decimal text at the edges: when parsing user input,
//! when reading or writing JSON numbers for the account service, and when
//! rendering currency strings in HTML.

use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

/// An amount of money in euro cents.
///
/// Arithmetic saturates at the bounds of `i64` instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero euros.
    pub const ZERO: Money = Money(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a number of cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Whether the amount is strictly less than zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert a decimal amount to cents, rounding half away from zero.
    ///
    /// Returns `None` if the amount does not fit in the cent representation.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
    }

    /// The amount as a decimal number of euros with two fraction digits.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parse a decimal number of euros, e.g. "25.50", "100" or "1e2".
    ///
    /// Leading and trailing whitespace is ignored. Returns `None` for text that
    /// is not a finite decimal number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .and_then(Self::from_decimal)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// Plain decimal text, e.g. "-12.30". Use [crate::html::format_currency] for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Number::from_str(&self.to_decimal().to_string())
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();

        Money::parse(&text)
            .ok_or_else(|| de::Error::custom(format!("{text} is not a valid amount of money")))
    }
}
