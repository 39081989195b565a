//! Event dispatcher - Routes authenticated webhook events to their handlers.
//!
//! Each event kind has at most one handler. Events without a handler are
//! acknowledged and dropped so Stripe stops redelivering them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::DispatchError;
use super::event::{EventKind, WebhookEvent};

/// Handler for a specific kind of Stripe webhook event.
///
/// Implementations should be stateless and focus on a single event kind.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// Returns the event kind(s) this handler processes.
    fn handles(&self) -> Vec<EventKind>;

    /// Handles the webhook event.
    async fn handle(&self, event: &WebhookEvent) -> Result<(), DispatchError>;
}

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler ran successfully.
    Handled,
    /// No handler is registered for the event kind.
    Ignored,
}

/// Routes events to the handler registered for their kind.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: HashMap<EventKind, Arc<dyn WebhookEventHandler>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every kind it handles, builder style.
    pub fn with_handler(mut self, handler: Arc<dyn WebhookEventHandler>) -> Self {
        self.register(handler);
        self
    }

    /// Registers `handler` for every kind it handles.
    ///
    /// A later registration for the same kind replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn WebhookEventHandler>) {
        for kind in handler.handles() {
            self.handlers.insert(kind, Arc::clone(&handler));
        }
    }

    /// Finds the handler for the given event kind.
    pub fn handler_for(&self, kind: &EventKind) -> Option<&Arc<dyn WebhookEventHandler>> {
        self.handlers.get(kind)
    }

    /// Kinds with a registered handler, in no particular order.
    pub fn registered_kinds(&self) -> Vec<&EventKind> {
        self.handlers.keys().collect()
    }

    /// Dispatches an event to its handler.
    ///
    /// # Returns
    ///
    /// - `Ok(DispatchOutcome::Handled)` - the handler succeeded
    /// - `Ok(DispatchOutcome::Ignored)` - no handler for this kind
    /// - `Err(_)` - the handler failed
    pub async fn dispatch(&self, event: WebhookEvent) -> Result<DispatchOutcome, DispatchError> {
        match self.handler_for(event.kind()) {
            Some(handler) => {
                handler.handle(&event).await?;
                Ok(DispatchOutcome::Handled)
            }
            None => {
                tracing::debug!(
                    event_id = %event.id(),
                    event_type = %event.event_type(),
                    "Unhandled event type"
                );
                Ok(DispatchOutcome::Ignored)
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("kinds", &self.registered_kinds())
            .finish()
    }
}
