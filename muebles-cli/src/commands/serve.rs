//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use muebles_server::ServerConfig;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "MUEBLES_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Validate payloads (400) and report missing rows (404)
    #[arg(long, env = "MUEBLES_STRICT")]
    pub strict: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let server = ServerConfig {
        bind_addr: args.bind,
        strict: args.strict,
    };

    muebles_server::serve(args.database.into(), server)
        .await
        .context("Server error")
}
