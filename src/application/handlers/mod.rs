//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    default_dispatcher, CreatePaymentIntentCommand, CreatePaymentIntentHandler,
    CreatePaymentIntentResult, GetPublicConfigHandler, HandleWebhookCommand, HandleWebhookError,
    HandleWebhookHandler, WebhookOutcome,
};
