//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::payment::Currency;

/// Payment configuration (Stripe)
///
/// The secret key and webhook secret are redacted in `Debug` output.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (`STRIPE_SECRET_KEY`)
    #[serde(default = "empty_secret")]
    pub stripe_secret_key: SecretString,

    /// Stripe publishable key, safe to hand to browsers (`STRIPE_PUBLISHABLE_KEY`)
    #[serde(default)]
    pub stripe_publishable_key: String,

    /// Stripe webhook signing secret (`STRIPE_WEBHOOK_SECRET`)
    #[serde(default = "empty_secret")]
    pub stripe_webhook_secret: SecretString,

    /// Currency used when a request omits one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Amount in minor units used when a request omits one
    #[serde(default = "default_amount")]
    pub default_amount: u64,

    /// Base URL for the Stripe API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Pinned Stripe API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Upper bound on a single Stripe API call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_live_")
    }

    /// Timeout applied to every Stripe API call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret_key = self.stripe_secret_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();

        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if self.stripe_publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PUBLISHABLE_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !secret_key.starts_with("sk_") && !secret_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPublishableKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        Currency::parse(&self.default_currency)
            .map_err(|_| ValidationError::InvalidCurrency(self.default_currency.clone()))?;
        if self.default_amount == 0 {
            return Err(ValidationError::InvalidAmount);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: empty_secret(),
            stripe_publishable_key: String::new(),
            stripe_webhook_secret: empty_secret(),
            default_currency: default_currency(),
            default_amount: default_amount(),
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_currency() -> String {
    "eur".to_string()
}

fn default_amount() -> u64 {
    100
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_api_version() -> String {
    "2024-06-20".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
