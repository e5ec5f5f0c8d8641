//! Item (mueble) record and request payload
//!
//! Wire keys follow the table columns: `nombre`, `tipo`, `estado`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// Column limits, mirrored from the table definition
const MAX_NAME_LEN: usize = 255;
const MAX_KIND_LEN: usize = 100;
const MAX_STATUS_LEN: usize = 100;

/// Item row as stored in `muebles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i32,
    #[serde(rename = "nombre")]
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    #[sqlx(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "estado")]
    #[sqlx(rename = "estado")]
    pub status: String,
}

/// Body of create and update requests.
///
/// Fields accept any JSON value; a missing key and `null` both end up as
/// SQL NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub nombre: Option<Value>,
    #[serde(default)]
    pub tipo: Option<Value>,
    #[serde(default)]
    pub estado: Option<Value>,
}

/// Values bound to the insert/update statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
}

impl ItemPayload {
    /// Pass values through as text, leaving rejection to the database.
    pub fn into_fields(self) -> ItemFields {
        ItemFields {
            name: self.nombre.and_then(as_text),
            kind: self.tipo.and_then(as_text),
            status: self.estado.and_then(as_text),
        }
    }

    /// Require three non-blank strings within the column limits.
    ///
    /// # Example
    /// ```
    /// use muebles_server::models::ItemPayload;
    /// use serde_json::json;
    ///
    /// let payload: ItemPayload =
    ///     serde_json::from_value(json!({"nombre": "Silla", "tipo": "Oficina"})).unwrap();
    /// assert!(payload.validate().is_err()); // estado missing
    /// ```
    pub fn validate(self) -> Result<ItemFields, ValidationError> {
        Ok(ItemFields {
            name: Some(required_text("nombre", self.nombre, MAX_NAME_LEN)?),
            kind: Some(required_text("tipo", self.tipo, MAX_KIND_LEN)?),
            status: Some(required_text("estado", self.estado, MAX_STATUS_LEN)?),
        })
    }
}

/// Text form of a JSON value; `null` has none.
fn as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn required_text(
    field: &'static str,
    value: Option<Value>,
    max: usize,
) -> Result<String, ValidationError> {
    let s = match value {
        None | Some(Value::Null) => return Err(ValidationError::Missing { field }),
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be a string",
            })
        }
    };

    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(s)
}

/// Parse the `:id` path segment.
pub fn parse_item_id(raw: &str) -> Result<i32, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "must be an integer",
    })
}
