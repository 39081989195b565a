//! Payment intent request and result types.
//!
//! A `PaymentIntentRequest` is built per incoming creation call with the
//! configured defaults applied, and is never persisted. The result carries the
//! client secret that the browser uses to confirm the payment.

use std::collections::BTreeMap;

use serde::Serialize;

use super::currency::Currency;
use super::errors::PaymentIntentError;

/// Metadata tag Stripe shows on intents created by this integration.
pub const INTEGRATION_CHECK: (&str, &str) = ("integration_check", "elements_custom");

/// Values applied when a creation request omits amount or currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentDefaults {
    /// Amount in minor units.
    pub amount: u64,
    /// Currency code.
    pub currency: Currency,
}

impl IntentDefaults {
    /// Creates defaults, validating the currency code.
    pub fn new(amount: u64, currency: &str) -> Result<Self, PaymentIntentError> {
        if amount == 0 {
            return Err(PaymentIntentError::validation(
                "amount",
                "default amount must be positive",
            ));
        }
        Ok(Self {
            amount,
            currency: Currency::parse(currency)?,
        })
    }
}

impl Default for IntentDefaults {
    fn default() -> Self {
        Self {
            amount: 100,
            currency: Currency::eur(),
        }
    }
}

/// Whether redirect-based payment methods may be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowRedirects {
    Never,
}

impl AllowRedirects {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
        }
    }
}

/// Automatic payment-method configuration sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutomaticPaymentMethods {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_redirects: Option<AllowRedirects>,
}

/// A validated request to create a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    amount: u64,
    currency: Currency,
    customer_email: Option<String>,
    payment_method_hints: Vec<String>,
}

impl PaymentIntentRequest {
    /// Builds a request from optional caller input, applying `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for a non-positive amount or a currency that
    /// is not a three-letter code.
    pub fn resolve(
        amount: Option<i64>,
        currency: Option<&str>,
        customer_email: Option<String>,
        payment_method_hints: Vec<String>,
        defaults: &IntentDefaults,
    ) -> Result<Self, PaymentIntentError> {
        let amount = match amount {
            None => defaults.amount,
            Some(value) if value > 0 => value as u64,
            Some(value) => {
                return Err(PaymentIntentError::validation(
                    "amount",
                    format!("must be a positive number of minor units, got {}", value),
                ))
            }
        };

        let currency = match currency {
            None => defaults.currency.clone(),
            Some(code) => Currency::parse(code)?,
        };

        let customer_email = customer_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        Ok(Self {
            amount,
            currency,
            customer_email,
            payment_method_hints,
        })
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    pub fn payment_method_hints(&self) -> &[String] {
        &self.payment_method_hints
    }

    /// Payment-method selection policy.
    ///
    /// Any hint disables redirect-based methods so the page can confirm
    /// in place; no hints leaves automatic resolution unrestricted.
    pub fn automatic_payment_methods(&self) -> AutomaticPaymentMethods {
        AutomaticPaymentMethods {
            enabled: true,
            allow_redirects: if self.payment_method_hints.is_empty() {
                None
            } else {
                Some(AllowRedirects::Never)
            },
        }
    }

    /// Metadata attached to the intent.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let (key, value) = INTEGRATION_CHECK;
        BTreeMap::from([(key.to_string(), value.to_string())])
    }
}

/// A created payment intent.
///
/// Only the client secret goes back to the caller; nothing is retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentResult {
    /// Stripe's intent ID (pi_...), kept for logging.
    pub id: String,
    /// Opaque secret the browser uses to confirm the payment.
    pub client_secret: String,
}
