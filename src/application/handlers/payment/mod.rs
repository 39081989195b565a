//! Payment handlers.
//!
//! ## Commands
//! - Creating payment intents
//! - Processing Stripe webhook deliveries
//!
//! ## Queries
//! - Public checkout configuration

mod create_payment_intent;
mod event_handlers;
mod get_public_config;
mod handle_webhook;

// Commands
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_webhook::{
    HandleWebhookCommand, HandleWebhookError, HandleWebhookHandler, WebhookOutcome,
};

// Queries
pub use get_public_config::GetPublicConfigHandler;

// Event handlers
pub use event_handlers::{default_dispatcher, PaymentFailedHandler, PaymentSucceededHandler};
