//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that logs and records envelopes

mod in_memory;

pub use in_memory::{InMemoryEventBus, DEFAULT_HISTORY};
