//! HandleWebhookHandler - Command handler for inbound Stripe webhook deliveries.
//!
//! ## Steps
//!
//! 1. Verify the signature over the raw body
//! 2. Optionally claim the event ID (duplicate suppression)
//! 3. Dispatch to the handler registered for the event kind
//! 4. Release the claim if dispatch failed, so Stripe's redelivery is retried

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::webhook::{
    DispatchError, DispatchOutcome, EventDispatcher, VerificationError, WebhookVerifier,
};
use crate::ports::{ProcessedEventStore, SaveResult};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Stripe-Signature header value, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A handler ran for the event.
    Processed,
    /// Event acknowledged; no handler for its kind.
    Ignored,
    /// Event ID already seen; not dispatched again.
    Duplicate,
}

/// Errors from webhook handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleWebhookError {
    /// The delivery failed authentication or could not be parsed.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// An authenticated event could not be processed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl HandleWebhookError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Verification(err) => err.status_code(),
            Self::Dispatch(err) => err.status_code(),
        }
    }
}

/// Handler for processing Stripe webhook deliveries.
pub struct HandleWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    dispatcher: Arc<EventDispatcher>,
    processed_events: Option<Arc<dyn ProcessedEventStore>>,
}

impl HandleWebhookHandler {
    pub fn new(verifier: Arc<WebhookVerifier>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            verifier,
            dispatcher,
            processed_events: None,
        }
    }

    /// Enables duplicate suppression backed by `store`.
    pub fn with_deduplication(mut self, store: Arc<dyn ProcessedEventStore>) -> Self {
        self.processed_events = Some(store);
        self
    }

    pub async fn handle(
        &self,
        cmd: HandleWebhookCommand,
    ) -> Result<WebhookOutcome, HandleWebhookError> {
        // 1. Authenticate
        let signature = cmd
            .signature
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(VerificationError::MissingSignatureHeader)?;

        let event = self
            .verifier
            .verify(&cmd.payload, signature)
            .map_err(|err| {
                tracing::warn!(error = %err, "Webhook verification failed");
                err
            })?;

        let event_id = event.id().to_string();
        tracing::info!(
            event_id = %event_id,
            event_type = %event.event_type(),
            livemode = event.is_live(),
            "Webhook event verified"
        );

        // 2. Claim
        if let Some(store) = &self.processed_events {
            if store.claim(&event_id).await? == SaveResult::AlreadyExists {
                tracing::info!(event_id = %event_id, "Duplicate webhook event skipped");
                return Ok(WebhookOutcome::Duplicate);
            }
        }

        // 3. Dispatch
        match self.dispatcher.dispatch(event).await {
            Ok(DispatchOutcome::Handled) => Ok(WebhookOutcome::Processed),
            Ok(DispatchOutcome::Ignored) => Ok(WebhookOutcome::Ignored),
            Err(err) => {
                tracing::error!(event_id = %event_id, error = %err, "Webhook dispatch failed");

                // 4. Release
                if let Some(store) = &self.processed_events {
                    if let Err(release_err) = store.release(&event_id).await {
                        tracing::error!(
                            event_id = %event_id,
                            error = %release_err,
                            "Failed to release webhook event claim"
                        );
                    }
                }
                Err(err.into())
            }
        }
    }
}
