//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - Payment intent creation at the payment gateway
//! - `ProcessedEventStore` - Webhook event deduplication

mod payment_provider;
mod processed_event_store;

pub use payment_provider::{PaymentError, PaymentErrorCode, PaymentProvider};
pub use processed_event_store::{ProcessedEventStore, SaveResult};
