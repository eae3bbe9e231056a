//! Class Scheduler HTTP server.
//!
//! Configuration comes from `CLASS_SCHEDULER__*` environment variables
//! (and `.env` in development). Without `CLASS_SCHEDULER__DATABASE__URL`
//! the server runs on in-memory adapters.

use tracing::info;
use tracing_subscriber::EnvFilter;

use class_scheduler::app::{build_router, Ports, StartupError};
use class_scheduler::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        database = config.database.is_some(),
        policy = %config.import.row_policy,
        "Starting class scheduler"
    );

    let ports = Ports::from_config(&config).await?;
    let app = build_router(&ports, &config)?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
