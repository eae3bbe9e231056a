//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event bus
//! - `http` - axum REST API
//! - `memory` - In-memory ports for tests and database-less runs
//! - `postgres` - sqlx PostgreSQL ports

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
