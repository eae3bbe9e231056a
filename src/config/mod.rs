//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLASS_SCHEDULER_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use class_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod import;
mod school;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use import::ImportConfig;
pub use school::SchoolConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; without it the in-memory adapters are used
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// School-local time and operating hours
    #[serde(default)]
    pub school: SchoolConfig,

    /// Bulk import limits and row policy
    #[serde(default)]
    pub import: ImportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLASS_SCHEDULER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLASS_SCHEDULER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLASS_SCHEDULER__DATABASE__URL=...` -> `database.url = ...`
    /// - `CLASS_SCHEDULER__SCHOOL__UTC_OFFSET_MINUTES=330` -> `school.utc_offset_minutes = 330`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASS_SCHEDULER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.school.validate()?;
        self.import.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
