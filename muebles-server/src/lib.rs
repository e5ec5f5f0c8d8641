//! muebles-server: HTTP CRUD API over the `muebles` table
//!
//! Startup order: build the pool, probe connectivity (bounded), ensure the
//! table, then serve. Database trouble at startup is logged and never fatal;
//! requests fail individually until the database comes back.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use http::{build_router, AppState};

use std::time::Duration;

use db::{check_connection, create_pool, ensure_schema, SchemaStatus};

/// Upper bound on the startup connectivity probe, independent of the
/// pool's acquire timeout, so an unresponsive host cannot hold the listener.
pub const STARTUP_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the pool, prepare the schema and run the HTTP server.
pub async fn serve(database: DatabaseConfig, server: ServerConfig) -> ServerResult<()> {
    tracing::info!(database = %database.display_target(), "Configuring PostgreSQL pool");
    let pool = create_pool(&database)?;

    prepare_database(&pool, STARTUP_PROBE_TIMEOUT).await;

    http::run_server(pool, server).await
}

/// Probe connectivity, then run the schema initializer once.
///
/// Never fails: an unreachable database or a schema error is logged and
/// `None` is returned so the caller can serve anyway.
pub async fn prepare_database(pool: &sqlx::PgPool, probe_timeout: Duration) -> Option<SchemaStatus> {
    match tokio::time::timeout(probe_timeout, check_connection(pool)).await {
        Ok(Ok(())) => {
            tracing::info!("Connected to PostgreSQL");
            initialize_schema(pool).await
        }
        Ok(Err(e)) => {
            tracing::error!(error = ?e, "Could not connect to PostgreSQL, serving anyway");
            None
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = probe_timeout.as_secs_f64(),
                "PostgreSQL did not answer in time, serving anyway"
            );
            None
        }
    }
}

/// Run the schema initializer once, logging the outcome.
///
/// Returns the status when it succeeded; failures are logged only.
pub async fn initialize_schema(pool: &sqlx::PgPool) -> Option<SchemaStatus> {
    match ensure_schema(pool).await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to initialize database schema");
            None
        }
    }
}
