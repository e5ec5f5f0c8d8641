//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS (any origin, GET/POST/PUT/DELETE, Content-Type)
//! - Request tracing
//! - Graceful shutdown that closes the pool
//! - JSON `{error, details}` error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::{ApiError, Operation};
pub use server::{build_router, run_server, AppState};
