//! In-memory processed-event store.
//!
//! Remembers recently seen webhook event IDs within a single process. The
//! set is bounded: once `capacity` IDs are held, the oldest is evicted.
//! State is lost on restart, so this only suppresses duplicates that arrive
//! while the process is up.

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::webhook::DispatchError;
use crate::ports::{ProcessedEventStore, SaveResult};

/// Bounded in-memory implementation of `ProcessedEventStore`.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryProcessedEventStore::new(10_000);
///
/// assert_eq!(store.claim("evt_1").await?, SaveResult::Inserted);
/// assert_eq!(store.claim("evt_1").await?, SaveResult::AlreadyExists);
/// ```
pub struct InMemoryProcessedEventStore {
    state: Mutex<SeenIds>,
    capacity: usize,
}

#[derive(Default)]
struct SeenIds {
    ids: HashSet<String>,
    order: VecDeque<String>,
}

impl InMemoryProcessedEventStore {
    /// Creates a store holding at most `capacity` IDs (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(SeenIds::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of IDs currently held.
    pub async fn len(&self) -> usize {
        self.state.lock().await.ids.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProcessedEventStore for InMemoryProcessedEventStore {
    async fn claim(&self, event_id: &str) -> Result<SaveResult, DispatchError> {
        let mut state = self.state.lock().await;

        if state.ids.contains(event_id) {
            return Ok(SaveResult::AlreadyExists);
        }

        while state.ids.len() >= self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.ids.remove(&oldest);
                }
                None => break,
            }
        }

        state.ids.insert(event_id.to_string());
        state.order.push_back(event_id.to_string());
        Ok(SaveResult::Inserted)
    }

    async fn release(&self, event_id: &str) -> Result<(), DispatchError> {
        let mut state = self.state.lock().await;
        if state.ids.remove(event_id) {
            state.order.retain(|id| id != event_id);
        }
        Ok(())
    }

    async fn contains(&self, event_id: &str) -> Result<bool, DispatchError> {
        Ok(self.state.lock().await.ids.contains(event_id))
    }
}
