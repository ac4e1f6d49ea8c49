//! Persistence boundary.
//!
//! The backing database is treated as an opaque tree of JSON documents
//! addressed by `/`-separated paths. [`TreeStore`] is the port; the adapters
//! are [`MemoryTree`] (tests, local runs) and [`PgTree`] (PostgreSQL).
//! [`ReportStore`] lays readings and reports out on top of it.

use std::future::Future;

use serde_json::Value;

use crate::error::StoreError;

mod memory;
mod postgres;
mod reports;

pub use memory::MemoryTree;
pub use postgres::PgTree;
pub use reports::ReportStore;

// ---

/// Port for a partitioned key-value tree.
///
/// Paths never start or end with `/`. Only leaves carry documents; interior
/// nodes exist implicitly while they have descendants.
pub trait TreeStore: Send + Sync + 'static {
    /// Write `value` at `path`, replacing any existing document.
    fn set(&self, path: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read the document at `path`, `None` if absent.
    fn get(&self, path: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Documents stored directly below `path`, as `(key, document)` pairs in
    /// no particular order. Missing paths yield an empty list.
    fn children(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Vec<(String, Value)>, StoreError>> + Send;

    /// Names of the immediate child nodes of `path`, leaves and subtrees alike.
    fn child_keys(&self, path: &str) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}

/// Join path segments with `/`.
pub(crate) fn join(segments: &[&str]) -> String {
    segments.join("/")
}
