//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One shared `PgPool`, injected into handlers through axum state
//! - Pool is built lazily: an unreachable database never blocks startup
//! - One parameterized statement per operation, no multi-statement transactions
//! - No retries: each call attempts once and reports the driver error

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{check_connection, create_pool, ping};
pub use repos::*;
pub use schema::{ensure_schema, SchemaStatus};
