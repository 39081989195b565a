//! Webhook domain module.
//!
//! Authenticates Stripe webhook deliveries and routes the resulting events
//! to handlers by kind.
//!
//! # Module Structure
//!
//! - `verifier` - Stripe-Signature parsing and HMAC-SHA256 verification
//! - `event` - Authenticated event and event kinds
//! - `dispatcher` - Kind-to-handler routing
//! - `errors` - Verification and dispatch errors

mod dispatcher;
mod errors;
mod event;
mod verifier;

pub use dispatcher::{DispatchOutcome, EventDispatcher, WebhookEventHandler};
pub use errors::{DispatchError, VerificationError};
pub use event::{EventKind, WebhookEvent};
pub use verifier::{
    generate_test_header, verify, SignatureHeader, WebhookVerifier, DEFAULT_CLOCK_SKEW_SECS,
    DEFAULT_TOLERANCE_SECS,
};

#[cfg(test)]
pub use event::WebhookEventBuilder;
