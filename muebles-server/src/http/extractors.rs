//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{parse_item_id, ItemPayload, ValidationError};

/// Extract and validate an item id from path
pub struct ItemId(pub i32);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Missing { field: "id" }))?;

        Ok(Self(parse_item_id(&id)?))
    }
}

/// Item payload from a JSON body, with rejections in the API error shape.
///
/// Outside strict mode a body without a JSON `Content-Type` is read as an
/// empty object, so every field binds NULL and the database decides.
/// Syntax errors are always rejected.
pub struct ItemBody(pub ItemPayload);

impl FromRequest<Arc<AppState>> for ItemBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        match Json::<ItemPayload>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(Self(payload)),
            Err(JsonRejection::MissingJsonContentType(_)) if !state.strict => {
                Ok(Self(ItemPayload::default()))
            }
            Err(rejection) => Err(ApiError::MalformedBody {
                details: rejection.body_text(),
            }),
        }
    }
}
