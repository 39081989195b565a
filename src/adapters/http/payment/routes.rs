//! Axum router configuration for payment endpoints.
//!
//! This module defines the route structure for the payment API and wires
//! the routes to their handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment_intent, get_config, handle_webhook, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
///
/// - `GET /config` - Publishable key and default currency
/// - `POST /create-payment-intent` - Create a payment intent
/// - `POST /webhook` - Handle Stripe webhooks (raw body, signature verified)
///
/// # Example
///
/// ```ignore
/// let app = payment_routes().with_state(PaymentAppState::from_config(&config)?);
/// ```
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/webhook", post(handle_webhook))
}
