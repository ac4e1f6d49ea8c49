//! PostgreSQL-backed tree store.
//!
//! Each leaf document is one row of `tree_nodes` (see `schema.rs`), keyed by
//! its full path and indexed by its parent path so that a partition can be
//! listed with a single query.
//!
//! Like [`super::MemoryTree`], a path is either a document or an interior
//! node: `set` fails with [`StoreError::PathConflict`] when an ancestor of
//! the path holds a document or when documents already exist below it.

use serde_json::Value;
use sqlx::PgPool;

use super::TreeStore;
use crate::error::StoreError;

// ---

#[derive(Debug, Clone)]
pub struct PgTree {
    pool: PgPool,
}

impl PgTree {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TreeStore for PgTree {
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        // ---
        let (parent, key) = path.rsplit_once('/').unwrap_or(("", path));

        let ancestors: Vec<String> = path
            .match_indices('/')
            .map(|(pos, _)| path[..pos].to_string())
            .collect();
        let conflict: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM tree_nodes
                WHERE path = ANY($1) OR path LIKE $2
            )
            "#,
        )
        .bind(&ancestors)
        .bind(format!("{}/%", escape_like(path)))
        .fetch_one(&self.pool)
        .await?;

        if conflict {
            return Err(StoreError::PathConflict(path.to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO tree_nodes (path, parent, key, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (path) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(path)
        .bind(parent)
        .bind(key)
        .bind(&value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        // ---
        let value: Option<Value> = sqlx::query_scalar("SELECT value FROM tree_nodes WHERE path = $1")
            .bind(path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn children(&self, path: &str) -> Result<Vec<(String, Value)>, StoreError> {
        // ---
        let rows: Vec<(String, Value)> =
            sqlx::query_as("SELECT key, value FROM tree_nodes WHERE parent = $1")
                .bind(path)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    async fn child_keys(&self, path: &str) -> Result<Vec<String>, StoreError> {
        // ---
        // First segment of every descendant path below `path`
        let keys: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT split_part(substr(path, char_length($1) + 2), '/', 1)
            FROM tree_nodes
            WHERE path LIKE $2
            "#,
        )
        .bind(path)
        .bind(format!("{}/%", escape_like(path)))
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }
}

/// Escape LIKE wildcards so `path` only matches itself.
fn escape_like(path: &str) -> String {
    // ---
    path.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
