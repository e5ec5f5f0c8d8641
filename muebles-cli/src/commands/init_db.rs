//! Schema initialization command
//!
//! Unlike `serve`, a failure here is the command's result, so it exits
//! non-zero when the database is unreachable.

use anyhow::{Context, Result};
use clap::Parser;

use muebles_server::db::{check_connection, create_pool, ensure_schema, SchemaStatus};
use muebles_server::DatabaseConfig;

use super::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create the muebles table if it does not exist
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = DatabaseConfig::from(args.database);
    tracing::info!(database = %config.display_target(), "Initializing schema");
    let pool = create_pool(&config).context("Invalid database configuration")?;

    check_connection(&pool)
        .await
        .with_context(|| format!("Failed to connect to {}", config.display_target()))?;

    let status = ensure_schema(&pool)
        .await
        .context("Failed to initialize schema")?;

    let created = status == SchemaStatus::Created;
    tracing::info!(created, "Schema ready");

    pool.close().await;
    Ok(())
}
