//! Schema initializer for the `muebles` table
//!
//! Runs once at startup: Unchecked -> (catalog query) -> Exists | Absent ->
//! (create if absent) -> Ready. Creation uses `IF NOT EXISTS` so two
//! instances starting together cannot fail each other.

use sqlx::PgPool;

use super::repos::{DbError, ITEMS_TABLE};

/// Outcome of [`ensure_schema`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Table was already there
    AlreadyPresent,
    /// Table was missing and has been created
    Created,
}

/// Check the catalog for the items table and create it when absent.
pub async fn ensure_schema(pool: &PgPool) -> Result<SchemaStatus, DbError> {
    tracing::info!(table = ITEMS_TABLE, "Checking whether table exists");

    let exists = table_exists(pool).await?;
    if exists {
        tracing::info!(table = ITEMS_TABLE, "Table already exists");
        return Ok(SchemaStatus::AlreadyPresent);
    }

    tracing::info!(table = ITEMS_TABLE, "Table missing, creating it");
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS muebles (
            id SERIAL PRIMARY KEY,
            nombre VARCHAR(255) NOT NULL,
            tipo VARCHAR(100) NOT NULL,
            estado VARCHAR(100) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!(table = ITEMS_TABLE, "Table created");
    Ok(SchemaStatus::Created)
}

/// Looks in the connection's current schema (`public` unless `search_path`
/// says otherwise), the same schema the unqualified CREATE targets.
async fn table_exists(pool: &PgPool) -> Result<bool, DbError> {
    let (exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = $1
        )
        "#,
    )
    .bind(ITEMS_TABLE)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
