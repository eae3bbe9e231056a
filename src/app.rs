//! Application wiring: ports, handlers and the HTTP router.
//!
//! Without a database configuration every port is in memory, seeded from
//! an optional JSON file. With one, sessions and reference data live in
//! PostgreSQL. Import jobs and events stay in process either way.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::http::{api_router, ImportHandlers, SessionHandlers};
use crate::adapters::memory::{
    InMemoryAllocationRegistry, InMemoryCalendarService, InMemoryCatalog,
    InMemoryImportJobRepository, InMemorySessionLogRepository, InMemorySessionStore,
    InMemoryStudentRoster, SeedData, SeedError,
};
use crate::adapters::postgres::{
    self, PostgresAllocationRegistry, PostgresCalendarService, PostgresCatalogReader,
    PostgresSessionLogRepository, PostgresSessionStore, PostgresStudentRoster,
};
use crate::application::handlers::{
    CommitImportHandler, CreateSessionHandler, DiscardImportHandler, GenerateTemplateHandler,
    GetSessionHandler, ImportSettings, ListSessionsHandler, OverrideTeacherHandler, ParseImportHandler,
    PreviewConflictsHandler, ReviewImportHandler, SubmitLogHandler, TransitionSessionHandler,
    UpdateSessionHandler,
};
use crate::config::{AppConfig, ValidationError};
use crate::ports::{
    AllocationRegistry, CalendarService, CatalogReader, EventPublisher, ImportJobRepository,
    SessionLogRepository, SessionStore, StudentRoster,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
    #[error("seed data: {0}")]
    Seed(#[from] SeedError),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

/// One implementation per port.
#[derive(Clone)]
pub struct Ports {
    pub sessions: Arc<dyn SessionStore>,
    pub catalog: Arc<dyn CatalogReader>,
    pub allocations: Arc<dyn AllocationRegistry>,
    pub calendar: Arc<dyn CalendarService>,
    pub roster: Arc<dyn StudentRoster>,
    pub logs: Arc<dyn SessionLogRepository>,
    pub jobs: Arc<dyn ImportJobRepository>,
    pub events: Arc<dyn EventPublisher>,
}

impl Ports {
    pub fn in_memory(seed: SeedData) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionStore::new()),
            catalog: Arc::new(InMemoryCatalog::new(seed.catalog)),
            allocations: Arc::new(InMemoryAllocationRegistry::new(seed.allocations)),
            calendar: Arc::new(InMemoryCalendarService::new(seed.calendar)),
            roster: Arc::new(InMemoryStudentRoster::new(seed.students)),
            logs: Arc::new(InMemorySessionLogRepository::new()),
            jobs: Arc::new(InMemoryImportJobRepository::new()),
            events: Arc::new(InMemoryEventBus::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
            catalog: Arc::new(PostgresCatalogReader::new(pool.clone())),
            allocations: Arc::new(PostgresAllocationRegistry::new(pool.clone())),
            calendar: Arc::new(PostgresCalendarService::new(pool.clone())),
            roster: Arc::new(PostgresStudentRoster::new(pool.clone())),
            logs: Arc::new(PostgresSessionLogRepository::new(pool)),
            jobs: Arc::new(InMemoryImportJobRepository::new()),
            events: Arc::new(InMemoryEventBus::new()),
        }
    }

    /// Holds at most `max_jobs` parsed import jobs.
    pub fn with_job_capacity(mut self, max_jobs: usize) -> Self {
        self.jobs = Arc::new(InMemoryImportJobRepository::with_capacity(max_jobs));
        self
    }

    /// Builds the ports the configuration asks for.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let ports = match &config.database {
            Some(database) => {
                let pool = postgres::connect(database).await?;
                if database.run_migrations {
                    postgres::run_migrations(&pool, Path::new(&database.migrations_dir)).await?;
                    info!(dir = %database.migrations_dir, "Migrations applied");
                }
                info!("Using PostgreSQL adapters");
                Self::postgres(pool)
            }
            None => {
                let seed = match &config.school.seed_file {
                    Some(path) => SeedData::load(Path::new(path)).await?,
                    None => SeedData::default(),
                };
                info!(
                    seeded = config.school.seed_file.is_some(),
                    teachers = seed.catalog.teachers.len(),
                    allocations = seed.allocations.len(),
                    "Using in-memory adapters"
                );
                Self::in_memory(seed)
            }
        };
        Ok(ports.with_job_capacity(config.import.max_jobs))
    }
}

/// Wires every handler over `ports` and returns the HTTP router.
pub fn build_router(ports: &Ports, config: &AppConfig) -> Result<Router, ValidationError> {
    let clock = config.school.clock()?;
    let schedule = config.school.operating_schedule()?;
    let settings = ImportSettings {
        max_rows: config.import.max_rows,
        policy: config.import.policy()?,
        clock,
    };

    let sessions = SessionHandlers {
        create: Arc::new(CreateSessionHandler::new(
            ports.sessions.clone(),
            ports.catalog.clone(),
            ports.allocations.clone(),
            ports.calendar.clone(),
            ports.events.clone(),
            schedule.clone(),
            clock,
        )),
        update: Arc::new(UpdateSessionHandler::new(
            ports.sessions.clone(),
            ports.catalog.clone(),
            ports.allocations.clone(),
            ports.calendar.clone(),
            ports.events.clone(),
            clock,
        )),
        get: Arc::new(GetSessionHandler::new(ports.sessions.clone(), ports.logs.clone())),
        list: Arc::new(ListSessionsHandler::new(ports.sessions.clone())),
        preview: Arc::new(PreviewConflictsHandler::new(
            ports.sessions.clone(),
            ports.allocations.clone(),
            ports.calendar.clone(),
            schedule,
            clock,
        )),
        transition: Arc::new(TransitionSessionHandler::new(
            ports.sessions.clone(),
            ports.events.clone(),
        )),
        submit_log: Arc::new(SubmitLogHandler::new(
            ports.sessions.clone(),
            ports.logs.clone(),
            ports.roster.clone(),
            ports.events.clone(),
        )),
    };

    let imports = ImportHandlers {
        template: Arc::new(GenerateTemplateHandler::new(ports.catalog.clone())),
        parse: Arc::new(ParseImportHandler::new(
            ports.sessions.clone(),
            ports.catalog.clone(),
            ports.allocations.clone(),
            ports.calendar.clone(),
            ports.jobs.clone(),
            settings,
        )),
        review: Arc::new(ReviewImportHandler::new(ports.jobs.clone())),
        override_teacher: Arc::new(OverrideTeacherHandler::new(
            ports.jobs.clone(),
            ports.catalog.clone(),
        )),
        commit: Arc::new(CommitImportHandler::new(
            ports.sessions.clone(),
            ports.jobs.clone(),
            ports.events.clone(),
        )),
        discard: Arc::new(DiscardImportHandler::new(ports.jobs.clone())),
    };

    Ok(api_router(sessions, imports, config.server.request_timeout()))
}
