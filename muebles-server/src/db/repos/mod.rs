//! Repository implementations for database access
//!
//! Each repository method issues exactly one parameterized statement.

pub mod items;

pub use items::{DbError, ItemRepo, ITEMS_TABLE};
