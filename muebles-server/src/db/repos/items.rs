//! Item repository
//!
//! One statement per operation, results returned as stored:
//! - list: plain `SELECT *`, no ordering or paging
//! - create/update: `RETURNING *` so the caller gets the row as written
//! - delete: reports affected rows, callers decide what a miss means

use sqlx::PgPool;

use crate::models::{Item, ItemFields};

/// Backing table name
pub const ITEMS_TABLE: &str = "muebles";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// Driver message without the wrapper prefix, as shown to clients.
    pub fn details(&self) -> String {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => e.message().to_string(),
            Self::Sqlx(e) => e.to_string(),
        }
    }
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All rows in storage order.
    pub async fn list(&self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM muebles")
            .fetch_all(self.pool)
            .await?;
        Ok(items)
    }

    /// Insert a row; NULL fields are rejected by the table constraints.
    pub async fn create(&self, fields: ItemFields) -> Result<Item, DbError> {
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO muebles (nombre, tipo, estado) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(fields.name)
        .bind(fields.kind)
        .bind(fields.status)
        .fetch_one(self.pool)
        .await?;
        Ok(item)
    }

    /// Replace all three fields of row `id`. `None` when no row matched.
    pub async fn update(&self, id: i32, fields: ItemFields) -> Result<Option<Item>, DbError> {
        let item = sqlx::query_as::<_, Item>(
            "UPDATE muebles SET nombre = $1, tipo = $2, estado = $3 WHERE id = $4 RETURNING *",
        )
        .bind(fields.name)
        .bind(fields.kind)
        .bind(fields.status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(item)
    }

    /// Hard delete. Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM muebles WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
