//! Stripe API response types.
//!
//! Only the fields this service reads are modelled; everything else in
//! Stripe's response is ignored by serde.

use serde::Deserialize;

/// Stripe PaymentIntent object (subset).
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// PaymentIntent ID (pi_...).
    pub id: String,
    /// Secret the browser uses to confirm the intent.
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error envelope returned by the Stripe API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeApiError,
}

/// Stripe API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Human-readable message, safe to show to the payer.
    #[serde(default)]
    pub message: Option<String>,
    /// Error category (invalid_request_error, card_error, ...).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Machine-readable code (e.g. parameter_invalid_integer).
    #[serde(default)]
    pub code: Option<String>,
    /// Offending request parameter, if any.
    #[serde(default)]
    pub param: Option<String>,
}
