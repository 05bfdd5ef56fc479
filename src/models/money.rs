//! Money type for representing currency amounts
//!
//! Amounts carry exactly two fractional digits, stored as integer cents (i64)
//! to avoid floating-point precision issues.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Currency symbols accepted (and ignored) by [`Money::parse`]
const KNOWN_SYMBOLS: [char; 4] = ['€', '$', '£', '¥'];

/// Largest magnitude, in cents, that [`Money::parse`] accepts (one trillion units)
pub const MAX_CENTS: i64 = 100_000_000_000_000;

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use my_expenses::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

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

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the amount lies within `-MAX_CENTS..=MAX_CENTS`
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -MAX_CENTS && self.0 <= MAX_CENTS
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "€10.50", "10.50 €", "10,50", "10".
    /// Amounts beyond [`MAX_CENTS`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .trim_start_matches(KNOWN_SYMBOLS)
            .trim_end_matches(KNOWN_SYMBOLS)
            .trim();
        let s = s.replace(',', ".");

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
            return Err(invalid());
        }

        let cents = if let Some((whole, frac)) = s.split_once('.') {
            if (whole.is_empty() && frac.is_empty())
                || frac.contains('.')
                || !frac.chars().all(|c| c.is_ascii_digit())
            {
                return Err(invalid());
            }

            let whole: i64 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };

            // Pad or truncate to 2 digits
            let frac: i64 = match frac.len() {
                0 => 0,
                1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => frac[..2].parse().map_err(|_| invalid())?,
            };

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(frac))
                .ok_or_else(invalid)?
        } else {
            s.parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?
        };

        if cents > MAX_CENTS {
            return Err(MoneyParseError::OutOfRange(original.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a trailing currency symbol, e.g. "100.00 €"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", self, symbol)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(10000).format_with_symbol("€"), "100.00 €");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("€10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.50 €").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("1.x").is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_beyond_limit() {
        assert_eq!(Money::parse("1000000000000").unwrap().cents(), MAX_CENTS);
        assert_eq!(Money::parse("-1000000000000").unwrap().cents(), -MAX_CENTS);
        assert_eq!(
            Money::parse("50000000000000000"),
            Err(MoneyParseError::OutOfRange("50000000000000000".into()))
        );
        assert!(matches!(
            Money::parse("1000000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let largest = Money::parse("1000000000000").unwrap();
        let total: Money = [largest, largest].iter().sum();
        assert_eq!(total.cents(), 2 * MAX_CENTS);
        assert!(!total.is_within_limit());

        let huge = Money::from_cents(i64::MAX - 1);
        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);
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
    fn test_remaining_balance() {
        let final_value = Money::parse("120,00 €").unwrap();
        let paid_value = Money::parse("€45.5").unwrap();
        let mut remaining = final_value - paid_value;
        assert_eq!(remaining.to_string(), "74.50");

        remaining += paid_value;
        assert_eq!(remaining, final_value);
        assert!((paid_value - final_value).is_negative());
    }
}
