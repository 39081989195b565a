//! Handlers for the payment intent events this service reacts to.
//!
//! Both only record the outcome. Fulfilment belongs to whatever consumes
//! these logs or replaces these handlers. A payload they cannot read is
//! logged and acknowledged; redelivery would not change its shape.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::webhook::{
    DispatchError, EventDispatcher, EventKind, WebhookEvent, WebhookEventHandler,
};

/// Subset of a PaymentIntent object as it appears in event payloads.
#[derive(Debug, Deserialize)]
struct PaymentIntentObject {
    id: String,
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    last_payment_error: Option<LastPaymentError>,
}

#[derive(Debug, Deserialize)]
struct LastPaymentError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn payment_intent(event: &WebhookEvent) -> Option<PaymentIntentObject> {
    match event.deserialize_object() {
        Ok(intent) => Some(intent),
        Err(e) => {
            tracing::warn!(
                event_id = %event.id(),
                event_type = %event.event_type(),
                error = %e,
                "Unreadable payment intent payload, acknowledging"
            );
            None
        }
    }
}

/// Handles `payment_intent.succeeded`.
#[derive(Debug, Default)]
pub struct PaymentSucceededHandler;

#[async_trait]
impl WebhookEventHandler for PaymentSucceededHandler {
    fn handles(&self) -> Vec<EventKind> {
        vec![EventKind::PaymentIntentSucceeded]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), DispatchError> {
        let Some(intent) = payment_intent(event) else {
            return Ok(());
        };

        tracing::info!(
            event_id = %event.id(),
            payment_intent_id = %intent.id,
            amount = ?intent.amount,
            currency = ?intent.currency,
            "Payment received"
        );
        Ok(())
    }
}

/// Handles `payment_intent.payment_failed`.
#[derive(Debug, Default)]
pub struct PaymentFailedHandler;

#[async_trait]
impl WebhookEventHandler for PaymentFailedHandler {
    fn handles(&self) -> Vec<EventKind> {
        vec![EventKind::PaymentIntentPaymentFailed]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), DispatchError> {
        let Some(intent) = payment_intent(event) else {
            return Ok(());
        };
        let (reason, code) = intent
            .last_payment_error
            .map(|e| (e.message, e.code))
            .unwrap_or((None, None));

        tracing::warn!(
            event_id = %event.id(),
            payment_intent_id = %intent.id,
            reason = reason.as_deref().unwrap_or("unknown"),
            decline_code = ?code,
            "Payment failed"
        );
        Ok(())
    }
}

/// Dispatcher with the built-in payment intent handlers registered.
pub fn default_dispatcher() -> EventDispatcher {
    EventDispatcher::new()
        .with_handler(Arc::new(PaymentSucceededHandler))
        .with_handler(Arc::new(PaymentFailedHandler))
}
