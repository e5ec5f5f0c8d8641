//! Startup and serve errors for muebles-server

use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server from running.
///
/// Database unavailability is not one of them: connectivity and schema
/// failures at startup are logged and the listener starts anyway.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid database configuration: {0}")]
    Config(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
