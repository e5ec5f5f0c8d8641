//! API error types with IntoResponse
//!
//! Every error becomes a JSON body of the form `{"error", "details"}`.
//! Database failures keep the raw driver message in `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

const INVALID_INPUT: &str = "Datos inválidos";
const NOT_FOUND: &str = "Mueble no encontrado";

/// Item operation a database failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Generic client-facing message for a failed operation
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Error al obtener los muebles",
            Self::Create => "Error al agregar el mueble",
            Self::Update => "Error al actualizar el mueble",
            Self::Delete => "Error al eliminar el mueble",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (400)
    Validation(ValidationError),

    /// Body could not be read as JSON (400)
    MalformedBody { details: String },

    /// No row with this id, strict mode only (404)
    NotFound { id: i32 },

    /// Database call failed (500, logged)
    Database { op: Operation, source: DbError },
}

impl ApiError {
    pub fn database(op: Operation, source: DbError) -> Self {
        Self::Database { op, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, INVALID_INPUT, e.to_string()),
            Self::MalformedBody { details } => (StatusCode::BAD_REQUEST, INVALID_INPUT, details),
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                NOT_FOUND,
                format!("no mueble with id {}", id),
            ),
            Self::Database { op, source } => {
                tracing::error!(operation = ?op, error = ?source, "{}", op.failure_message());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    op.failure_message(),
                    source.details(),
                )
            }
        };

        (status, Json(json!({ "error": error, "details": details }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
