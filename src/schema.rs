//! Database schema management for `farmconnect-sensors`.
//!
//! Ensures the tree table backing [`crate::PgTree`] exists before serving
//! requests. Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the `tree_nodes` table holding one JSON document per leaf path,
/// plus an index on the parent path used to list a partition. Safe to call
/// on every startup.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tree_nodes (
            path        TEXT        PRIMARY KEY,
            parent      TEXT        NOT NULL,
            key         TEXT        NOT NULL,
            value       JSONB       NOT NULL,
            written_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Partition listing: readings/{user}, reports/{user}
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tree_nodes_parent
            ON tree_nodes (parent);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Prefix scans for child_keys
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tree_nodes_path_prefix
            ON tree_nodes (path text_pattern_ops);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
