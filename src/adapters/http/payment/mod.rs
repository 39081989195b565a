//! HTTP adapter for the payment endpoints.
//!
//! - `GET /config`
//! - `POST /create-payment-intent`
//! - `POST /webhook`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AppStateError, PaymentAppState, STRIPE_SIGNATURE_HEADER};
pub use routes::payment_routes;
