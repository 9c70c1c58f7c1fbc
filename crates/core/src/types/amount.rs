//! Donation amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Donation totals are never negative.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative monetary amount with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount {
    /// Amount in the currency's standard unit (pounds, not piastres).
    value: Decimal,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

#[derive(Deserialize)]
struct RawAmount {
    value: Decimal,
    #[serde(default)]
    currency: CurrencyCode,
}

impl TryFrom<RawAmount> for Amount {
    type Error = AmountError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        Self::new(raw.value, raw.currency)
    }
}

impl Amount {
    /// Create a new amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] for values below zero.
    pub fn new(value: Decimal, currency: CurrencyCode) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        Ok(Self { value, currency })
    }

    /// A zero amount in `currency`.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            value: Decimal::ZERO,
            currency,
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// The currency code.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero(CurrencyCode::default())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {:?}", self.value, self.currency)
    }
}

/// ISO 4217 currency codes accepted by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EGP,
    SAR,
    USD,
}
