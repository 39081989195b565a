//! Webhook error types for Stripe webhook handling.
//!
//! Verification failures are client errors: the delivery is rejected and the
//! event never reaches a handler. Dispatch failures happen after a delivery
//! was authenticated and are reported as server errors so Stripe redelivers.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that reject an inbound webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The request carried no Stripe-Signature header.
    #[error("Missing Stripe-Signature header")]
    MissingSignatureHeader,

    /// No webhook signing secret is configured.
    #[error("Webhook signing secret is not configured")]
    MissingSecret,

    /// The header could not be split into a timestamp and signatures.
    #[error("Unable to extract timestamp and signatures from header: {0}")]
    MalformedHeader(String),

    /// The header contained no usable signature for the expected scheme.
    #[error("No signatures found with expected scheme")]
    NoSignatures,

    /// None of the provided signatures matched the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// The signed timestamp is older than the tolerance window.
    #[error("Timestamp outside the tolerance zone ({age_secs}s old)")]
    TimestampOutOfRange { age_secs: i64 },

    /// The signed timestamp is ahead of local time beyond the allowed skew.
    #[error("Timestamp is {ahead_secs}s in the future")]
    TimestampInFuture { ahead_secs: i64 },

    /// The authenticated body is not a Stripe event.
    #[error("Malformed event payload: {0}")]
    MalformedPayload(String),
}

impl VerificationError {
    /// Maps the error to an HTTP status code.
    ///
    /// Every rejection is a 400 so Stripe does not keep retrying a
    /// delivery that can never verify.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Errors raised while dispatching an authenticated event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A registered handler failed.
    #[error("Handler for {kind} failed: {message}")]
    Handler { kind: String, message: String },

    /// The processed-event store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DispatchError {
    /// Creates a handler failure for the given event kind.
    pub fn handler(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Returns true if Stripe should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Maps the error to an HTTP status code.
    ///
    /// 5xx tells Stripe to redeliver the event later.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
