//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! The only operation this service needs is payment intent creation; the
//! browser completes the payment directly against the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{PaymentIntentRequest, PaymentIntentResult};

/// Port for payment provider integrations.
///
/// Implementations perform exactly one upstream attempt per call. A failed
/// creation is reported to the caller and never retried here.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent and return its client secret.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResult, PaymentError>;
}

/// Payment provider error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message, as reported by the provider where available.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation could in principle be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create a card declined error.
    pub fn card_declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::CardDeclined, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Card was declined.
    CardDeclined,

    /// The provider rejected the request parameters.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_error_network_is_retryable() {
        let err = PaymentError::network("Connection refused");
        assert!(err.retryable);
        assert_eq!(err.code, PaymentErrorCode::NetworkError);
    }

    #[test]
    fn payment_error_declined_not_retryable() {
        let err = PaymentError::card_declined("Insufficient funds");
        assert!(!err.retryable);
    }

    #[test]
    fn payment_error_invalid_request_not_retryable() {
        let err = PaymentError::invalid_request("Invalid currency: xyz");
        assert!(!err.retryable);
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
    }

    #[test]
    fn payment_error_with_provider_code() {
        let err = PaymentError::card_declined("Declined").with_provider_code("card_declined");
        assert_eq!(err.provider_code, Some("card_declined".to_string()));
    }

    #[test]
    fn payment_error_displays_code_and_message() {
        let err = PaymentError::authentication("Invalid API Key provided");
        assert_eq!(
            err.to_string(),
            "authentication_error: Invalid API Key provided"
        );
    }

    #[test]
    fn payment_error_code_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentErrorCode::RateLimitExceeded).unwrap();
        assert_eq!(json, "\"rate_limit_exceeded\"");
    }
}
