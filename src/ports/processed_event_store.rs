//! ProcessedEventStore port - Interface for tracking processed webhook events.
//!
//! Stripe may deliver the same event more than once. When deduplication is
//! enabled, the webhook handler claims an event ID before dispatching and
//! releases the claim if dispatch fails, so a redelivery can retry it.

use async_trait::async_trait;

use crate::domain::webhook::DispatchError;

/// Result of attempting to claim an event ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// The ID was recorded (first time seeing this event).
    Inserted,
    /// The ID was already recorded (duplicate delivery).
    AlreadyExists,
}

/// Port for tracking which webhook events have been processed.
///
/// `claim` must be atomic: of two concurrent claims for the same ID, exactly
/// one gets `Inserted`.
#[async_trait]
pub trait ProcessedEventStore: Send + Sync {
    /// Record `event_id` as processed unless it already is.
    async fn claim(&self, event_id: &str) -> Result<SaveResult, DispatchError>;

    /// Forget `event_id` so a later delivery is processed again.
    async fn release(&self, event_id: &str) -> Result<(), DispatchError>;

    /// Check if an event ID is currently recorded.
    async fn contains(&self, event_id: &str) -> Result<bool, DispatchError>;
}
