//! Health check endpoint

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::ping;
use crate::http::server::AppState;

/// Upper bound on the database probe so health never hangs on the pool
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health - `SELECT 1` through the pool, bounded by [`PROBE_TIMEOUT`]
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let reachable = matches!(
        tokio::time::timeout(PROBE_TIMEOUT, ping(&state.pool)).await,
        Ok(Ok(()))
    );

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: if reachable { "up" } else { "down" },
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
