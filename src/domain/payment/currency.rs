//! ISO 4217 currency codes.

use serde::{Serialize, Serializer};

use super::errors::PaymentIntentError;

/// A three-letter ISO 4217 currency code, stored lowercase as Stripe expects.
///
/// Only the shape is checked here. Whether Stripe supports the currency is
/// decided upstream and surfaces as an upstream error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    /// Parses and normalises a currency code.
    ///
    /// # Errors
    ///
    /// Returns `PaymentIntentError::ValidationFailed` unless the input is
    /// exactly three ASCII letters (surrounding whitespace ignored).
    pub fn parse(raw: &str) -> Result<Self, PaymentIntentError> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentIntentError::validation(
                "currency",
                format!("'{}' is not a three-letter ISO 4217 code", raw),
            ));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Euro, the default checkout currency.
    pub fn eur() -> Self {
        Self("eur".to_string())
    }

    /// Returns the lowercase code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
