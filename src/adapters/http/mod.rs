//! HTTP adapters - REST API implementations.
//!
//! - `payment` - Config, payment intent and webhook endpoints
//! - `router` - Full application router with static assets and middleware

pub mod payment;
pub mod router;

// Re-export key types for convenience
pub use payment::{payment_routes, AppStateError, PaymentAppState};
pub use router::app_router;
