//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration:
//! - Payment intent creation over the Stripe REST API
//! - A mock provider for tests
//!
//! # Security
//!
//! - The secret key is held in a `secrecy::SecretString` and never logged
//!
//! Webhook signature verification lives in `domain::webhook`, since it needs
//! only the signing secret and no API access.

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{StripeApiError, StripeErrorBody, StripePaymentIntent};
pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{
    map_stripe_error, payment_intent_form, StripeConfig, StripePaymentAdapter,
    DEFAULT_API_VERSION,
};
