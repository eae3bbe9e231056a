//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, time slots, errors, events)
//! - `allocation` - Teacher/class/subject allocation triples
//! - `calendar` - Calendar exceptions and school operating hours
//! - `catalog` - Boards, classes, subjects, chapters, topics and teachers
//! - `session` - Session aggregate, draft, lifecycle and teaching log
//! - `scheduling` - Conflict evaluation, auto-assignment and titles
//! - `import` - Bulk CSV import pipeline

pub mod allocation;
pub mod calendar;
pub mod catalog;
pub mod foundation;
pub mod import;
pub mod scheduling;
pub mod session;
