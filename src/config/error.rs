//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address")]
    InvalidBindAddress,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be between 1 and 100")]
    InvalidPoolSize,

    #[error("UTC offset must be within +/- 23:59")]
    InvalidUtcOffset,

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid time of day for {field}: {value}")]
    InvalidTimeOfDay { field: &'static str, value: String },

    #[error("Invalid operating schedule: {0}")]
    InvalidSchedule(String),

    #[error("Import max_rows must be between 1 and 10000")]
    InvalidMaxRows,

    #[error("Import max_jobs must be at least 1")]
    InvalidMaxJobs,

    #[error("Unknown row validity policy: {0}")]
    InvalidPolicy(String),
}
