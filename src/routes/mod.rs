//! HTTP surface over [`AnalysisService`].
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared service as state, so `main.rs` never sees individual
//! endpoints.

use std::sync::Arc;

use axum::Router;

use crate::{AnalysisService, TreeStore};

mod error;
mod health;
mod readings;
mod reports;
mod sensors;

pub use error::ApiError;

// ---

/// Shared state handed to every handler.
pub type SharedService<S> = Arc<AnalysisService<S>>;

pub fn router<S: TreeStore>(service: AnalysisService<S>) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(reports::router())
        .merge(sensors::router())
        .merge(health::router())
        .with_state(Arc::new(service))
}
