//! Item (mueble) endpoints
//!
//! Each handler runs one repository call. Outside strict mode the payload
//! is handed to the database untouched and misses are not reported.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::ItemRepo;
use crate::http::error::{ApiError, Operation};
use crate::http::extractors::{ItemBody, ItemId};
use crate::http::server::AppState;
use crate::models::{Item, ItemFields, ItemPayload};

/// Confirmation returned by DELETE
pub const DELETED_MESSAGE: &str = "Mueble eliminado";

/// Delete confirmation body
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

impl AppState {
    fn item_fields(&self, payload: ItemPayload) -> Result<ItemFields, ApiError> {
        if self.strict {
            Ok(payload.validate()?)
        } else {
            Ok(payload.into_fields())
        }
    }
}

/// GET /muebles - every row, storage order
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    tracing::info!("Fetching muebles");
    let items = ItemRepo::new(&state.pool)
        .list()
        .await
        .map_err(|e| ApiError::database(Operation::List, e))?;

    tracing::info!(count = items.len(), "Muebles fetched");
    tracing::debug!(?items, "Muebles rows");
    Ok(Json(items))
}

/// POST /muebles - insert and return the created row
async fn create_item(
    State(state): State<Arc<AppState>>,
    ItemBody(payload): ItemBody,
) -> Result<Json<Item>, ApiError> {
    let fields = state.item_fields(payload)?;
    tracing::info!(?fields, "Adding mueble");

    let item = ItemRepo::new(&state.pool)
        .create(fields)
        .await
        .map_err(|e| ApiError::database(Operation::Create, e))?;

    tracing::info!(id = item.id, "Mueble added");
    Ok(Json(item))
}

/// PUT /muebles/{id} - replace all fields of one row
///
/// A miss answers 200 with an empty body unless strict mode is on.
async fn update_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    ItemBody(payload): ItemBody,
) -> Result<Response, ApiError> {
    let fields = state.item_fields(payload)?;
    tracing::info!(id, "Updating mueble");

    let updated = ItemRepo::new(&state.pool)
        .update(id, fields)
        .await
        .map_err(|e| ApiError::database(Operation::Update, e))?;

    match updated {
        Some(item) => {
            tracing::info!(id, "Mueble updated");
            Ok(Json(item).into_response())
        }
        None if state.strict => Err(ApiError::NotFound { id }),
        None => {
            tracing::info!(id, "No mueble matched update");
            Ok(StatusCode::OK.into_response())
        }
    }
}

/// DELETE /muebles/{id} - hard delete
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> Result<Json<DeletedResponse>, ApiError> {
    tracing::info!(id, "Deleting mueble");

    let removed = ItemRepo::new(&state.pool)
        .delete(id)
        .await
        .map_err(|e| ApiError::database(Operation::Delete, e))?;

    if removed == 0 && state.strict {
        return Err(ApiError::NotFound { id });
    }

    tracing::info!(id, removed, "Mueble deleted");
    Ok(Json(DeletedResponse {
        message: DELETED_MESSAGE,
    }))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/muebles", get(list_items).post(create_item))
        .route("/muebles/{id}", put(update_item).delete(delete_item))
}
