//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Stripe REST API payment provider (and a mock)
//! - `events` - Processed-event tracking for webhook deduplication
//! - `http` - Axum HTTP surface

pub mod events;
pub mod http;
pub mod stripe;

pub use events::InMemoryProcessedEventStore;
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
