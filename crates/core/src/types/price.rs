//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price is not a valid number")]
    Invalid,
    /// The input is a valid number but negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative product price.
///
/// Prices use decimal arithmetic so that a value like `19.99` survives
/// storage and display exactly, in both backends. Both backends serialize
/// the amount as its canonical decimal string.
///
/// Two parsing modes exist because the product forms treat bad input
/// differently:
///
/// - [`Price::parse`] rejects non-numeric and negative input (used by the
///   edit form, which refuses the update and reports the error).
/// - [`Price::parse_lenient`] coerces anything unusable to zero (used by the
///   create form, which always stores a product).
///
/// ## Examples
///
/// ```
/// use tienda_core::Price;
///
/// let price = Price::parse("19.99").unwrap();
/// assert_eq!(price.to_string(), "19.99");
///
/// assert!(Price::parse("gratis").is_err());
/// assert_eq!(Price::parse_lenient("gratis"), Price::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price from user input, rejecting anything unusable.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Invalid`] when the input is not a decimal
    /// number, and [`PriceError::Negative`] when it is below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid)?;
        Self::new(amount)
    }

    /// Parse a price from user input, coercing anything unusable to zero.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::ZERO)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
