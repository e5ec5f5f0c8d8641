//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS matching what browser clients of the API expect
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
    /// Differentiated 400/404 responses instead of pass-through behavior
    pub strict: bool,
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::muebles::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default())?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> ServerResult<()> {
    if config.strict {
        tracing::info!("Strict mode enabled: invalid input answers 400, missing rows 404");
    }

    let app = build_router(AppState {
        pool: pool.clone(),
        strict: config.strict,
    });

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::warn!("Received SIGTERM, starting shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::DatabaseConfig;
    use crate::db::create_pool;

    /// Router over a pool that can never connect
    fn offline_app(strict: bool) -> Router {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout: Duration::from_millis(300),
            ..Default::default()
        };
        let pool = create_pool(&config).expect("lazy pool");
        build_router(AppState { pool, strict })
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_database_down() {
        let response = offline_app(false)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "down");
    }

    #[tokio::test]
    async fn list_without_database_is_500_with_details() {
        let response = offline_app(false)
            .oneshot(Request::builder().uri("/muebles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Error al obtener los muebles");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn lenient_create_reaches_database() {
        // Missing estado is not caught before the database call
        let response = offline_app(false)
            .oneshot(json_request(
                "POST",
                "/muebles",
                json!({"nombre": "Silla", "tipo": "Oficina"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Error al agregar el mueble");
    }

    #[tokio::test]
    async fn strict_create_rejects_missing_field() {
        let response = offline_app(true)
            .oneshot(json_request(
                "POST",
                "/muebles",
                json!({"nombre": "Silla", "tipo": "Oficina"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Datos inválidos");
        assert_eq!(body["details"], "estado is required");
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let response = offline_app(false)
            .oneshot(json_request(
                "PUT",
                "/muebles/abc",
                json!({"nombre": "a", "tipo": "b", "estado": "c"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = offline_app(false)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/muebles/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let response = offline_app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/muebles")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Datos inválidos");
    }

    fn untyped_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn lenient_body_without_content_type_reaches_database() {
        let body = json!({"nombre": "Silla", "tipo": "Oficina", "estado": "Nuevo"});

        let response = offline_app(false)
            .oneshot(untyped_request("POST", "/muebles", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Error al agregar el mueble");

        let response = offline_app(false)
            .oneshot(untyped_request("PUT", "/muebles/1", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Error al actualizar el mueble");
    }

    #[tokio::test]
    async fn strict_body_without_content_type_is_400() {
        let response = offline_app(true)
            .oneshot(untyped_request(
                "POST",
                "/muebles",
                json!({"nombre": "Silla", "tipo": "Oficina", "estado": "Nuevo"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Datos inválidos");
    }

    #[tokio::test]
    async fn responses_carry_cors_headers() {
        let response = offline_app(false)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn preflight_allows_crud_methods() {
        let response = offline_app(false)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/muebles/1")
                    .header("origin", "http://example.com")
                    .header("access-control-request-method", "PUT")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let methods = response.headers()["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .to_string();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "missing {method} in {methods}");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = offline_app(false)
            .oneshot(Request::builder().uri("/sillas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
