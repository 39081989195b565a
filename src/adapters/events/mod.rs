//! Event tracking adapters.
//!
//! - `InMemoryProcessedEventStore` - Bounded, process-local webhook deduplication

mod in_memory;

pub use in_memory::InMemoryProcessedEventStore;
