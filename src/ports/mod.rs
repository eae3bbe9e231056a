//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Scheduling Ports
//!
//! - `SessionStore` - Persisted sessions and lifecycle transitions
//! - `AllocationRegistry` - Teacher/class/subject allocations
//! - `CalendarService` - Holidays, exam days and other exceptions
//! - `StudentRoster` - Class enrolment for log validation
//! - `SessionLogRepository` - Submitted teaching logs
//! - `CatalogReader` - Boards, classes, subjects and teachers
//!
//! ## Import Ports
//!
//! - `ImportJobRepository` - Parsed jobs between upload and commit
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Publishing domain events

mod allocation_registry;
mod calendar_service;
mod catalog_reader;
mod event_publisher;
mod import_job_repository;
mod session_log_repository;
mod session_store;
mod student_roster;

pub use allocation_registry::AllocationRegistry;
pub use calendar_service::CalendarService;
pub use catalog_reader::CatalogReader;
pub use event_publisher::EventPublisher;
pub use import_job_repository::ImportJobRepository;
pub use session_log_repository::SessionLogRepository;
pub use session_store::{SessionFilter, SessionStore, StatusTransition};
pub use student_roster::StudentRoster;
