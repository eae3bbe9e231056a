//! In-memory adapters for every port.
//!
//! Used by tests and by the server when no database is configured.

mod allocation_registry;
mod calendar_service;
mod catalog_reader;
mod import_job_repository;
mod seed;
mod session_log_repository;
mod session_store;
mod student_roster;

pub use allocation_registry::InMemoryAllocationRegistry;
pub use calendar_service::InMemoryCalendarService;
pub use catalog_reader::InMemoryCatalog;
pub use import_job_repository::{InMemoryImportJobRepository, DEFAULT_MAX_JOBS};
pub use seed::{SeedData, SeedError};
pub use session_log_repository::InMemorySessionLogRepository;
pub use session_store::InMemorySessionStore;
pub use student_roster::InMemoryStudentRoster;
