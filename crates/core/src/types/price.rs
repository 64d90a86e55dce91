//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel in two shapes: [`PriceInput`] is what a form holds while the
//! admin is typing (the API and the input widget may hand over either a string
//! or a number), and [`Price`] is the validated, non-negative amount.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a finite number.
    #[error("price is not a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price must be zero or greater")]
    Negative,
}

/// A non-negative price in the store currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from a floating point amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for NaN/infinite values or values
    /// outside the decimal range, [`PriceError::Negative`] below zero.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NotANumber);
        }
        let amount = Decimal::try_from(amount).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// Parse a price from its textual form (e.g. `"999.99"`).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] if the text is not a decimal
    /// number, [`PriceError::Negative`] below zero.
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let amount = text
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g. `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A price as entered in a form: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// A number handed over by the API or a numeric widget.
    Number(f64),
    /// Raw text typed by the user.
    Text(String),
}

impl PriceInput {
    /// The text shown in the input widget.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl Default for PriceInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for PriceInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PriceInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for PriceInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Price> for PriceInput {
    fn from(price: Price) -> Self {
        Self::Text(price.to_string())
    }
}
