//! Monetary amount with exactly 2 decimal places.
//!
//! Uses `rust_decimal` so that QIF amounts are normalized without ever
//! passing through a binary floating-point representation.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Grouping character stripped from amounts before parsing.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Reasons an amount string is rejected.
#[derive(Error, Debug)]
pub enum AmountError {
    /// Anything besides digits, a sign, `.` or an exponent marker
    #[error("unexpected character {0:?} in amount")]
    InvalidCharacter(char),

    #[error(transparent)]
    Decimal(#[from] rust_decimal::Error),
}

/// A signed amount normalized to exactly 2 fraction digits.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use qif2csv::Amount;
///
/// let amount = Amount::from_str("1,234.5").unwrap();
/// assert_eq!(amount.to_string(), "1234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of fraction digits every amount is rendered with.
    pub const SCALE: u32 = 2;

    /// Creates a new `Amount`, rounding half-to-even to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses QIF amount text: separators are removed, then the remainder
    /// must be a plain decimal or scientific-notation number. Whitespace and
    /// digit separators such as `_` are rejected.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let stripped: String = s.chars().filter(|&c| c != THOUSANDS_SEPARATOR).collect();

        if let Some(bad) = stripped
            .chars()
            .find(|c| !matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        {
            return Err(AmountError::InvalidCharacter(bad));
        }

        let decimal = match Decimal::from_str(&stripped) {
            Ok(d) => d,
            Err(plain_err) => {
                if stripped.contains(['e', 'E']) {
                    Decimal::from_scientific(&stripped)?
                } else {
                    return Err(plain_err.into());
                }
            }
        };
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
