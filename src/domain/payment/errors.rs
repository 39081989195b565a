//! Payment intent error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | Upstream | 400 |
//!
//! Upstream failures are reported as client errors carrying Stripe's own
//! message. They are never retried here, so a payment is never created twice.

use axum::http::StatusCode;
use thiserror::Error;

use crate::ports::PaymentError;

/// Errors from creating a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentIntentError {
    /// The creation request was malformed.
    #[error("Invalid {field}: {message}")]
    ValidationFailed {
        field: &'static str,
        message: String,
    },

    /// Stripe rejected the request or could not be reached.
    #[error("Upstream error: {0}")]
    Upstream(PaymentError),
}

impl PaymentIntentError {
    /// Creates a validation error for the given field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field,
            message: message.into(),
        }
    }

    /// Message shown to the API caller.
    ///
    /// Upstream errors expose the provider's message verbatim.
    pub fn message(&self) -> String {
        match self {
            Self::ValidationFailed { .. } => self.to_string(),
            Self::Upstream(err) => err.message.clone(),
        }
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed { .. } | Self::Upstream(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<PaymentError> for PaymentIntentError {
    fn from(err: PaymentError) -> Self {
        Self::Upstream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PaymentErrorCode;

    #[test]
    fn validation_message_names_field() {
        let err = PaymentIntentError::validation("amount", "must be positive");
        assert_eq!(err.message(), "Invalid amount: must be positive");
    }

    #[test]
    fn upstream_message_is_provider_text() {
        let err = PaymentIntentError::from(PaymentError::new(
            PaymentErrorCode::InvalidRequest,
            "Invalid currency: xyz",
        ));
        assert_eq!(err.message(), "Invalid currency: xyz");
    }

    #[test]
    fn all_errors_are_bad_request() {
        let validation = PaymentIntentError::validation("currency", "bad");
        let upstream = PaymentIntentError::from(PaymentError::network("connection reset"));
        let auth = PaymentIntentError::from(PaymentError::authentication("Invalid API Key"));

        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(upstream.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(auth.status_code(), StatusCode::BAD_REQUEST);
    }
}
