//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSessionStore` - Sessions and row-locked lifecycle transitions
//! - `PostgresSessionLogRepository` - Teaching logs with JSONB student notes
//! - `PostgresAllocationRegistry` - Teacher allocations in registry order
//! - `PostgresCalendarService` - Calendar exceptions by date range
//! - `PostgresCatalogReader` / `PostgresStudentRoster` - Read-only catalog

mod allocation_registry;
mod calendar_service;
mod catalog_reader;
mod session_log_repository;
mod session_store;

pub use allocation_registry::PostgresAllocationRegistry;
pub use calendar_service::PostgresCalendarService;
pub use catalog_reader::{PostgresCatalogReader, PostgresStudentRoster};
pub use session_log_repository::PostgresSessionLogRepository;
pub use session_store::PostgresSessionStore;

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens a connection pool sized by the database configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Applies the SQL migrations found in `dir`.
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await
}
