//! Subcommand implementations

pub mod init_db;
pub mod serve;

use std::time::Duration;

use clap::Args;
use muebles_server::config::{DatabaseConfig, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};

pub use init_db::{run_init_db, InitDbArgs};
pub use serve::{run_serve, ServeArgs};

/// Database connection flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL (overrides the individual settings below)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "MUEBLES_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "MUEBLES_DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "MUEBLES_DB_NAME", default_value = "app_muebles")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "MUEBLES_DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "MUEBLES_DB_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub db_password: String,

    /// Maximum pooled connections
    #[arg(long, env = "MUEBLES_DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub db_max_connections: u32,

    /// Seconds a request waits for a pooled connection
    #[arg(long, env = "MUEBLES_DB_ACQUIRE_TIMEOUT", default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub db_acquire_timeout: u64,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.db_host,
            port: args.db_port,
            database: args.db_name,
            user: args.db_user,
            password: args.db_password,
            url: args.database_url,
            max_connections: args.db_max_connections,
            acquire_timeout: Duration::from_secs(args.db_acquire_timeout),
        }
    }
}
