//! Class Scheduler - Classroom session scheduling and conflict detection
//!
//! This crate schedules teaching sessions, assigns teachers from the
//! allocation table, warns about holidays, exam days and double bookings,
//! and imports timetables in bulk from CSV uploads.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
