//! Domain models
//!
//! Request payloads are kept loose on purpose so the default mode can hand
//! whatever the client sent to the database. Strict validation is an
//! explicit step ([`ItemPayload::validate`]), never implicit in parsing.

pub mod item;
pub mod validation;

pub use item::{parse_item_id, Item, ItemFields, ItemPayload};
pub use validation::ValidationError;
