//! Liveness endpoint.
//!
//! Used by container orchestrators and CI to check the service answers HTTP
//! requests. It does not touch the tree store.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::catalog;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    sensor_types: usize,
}

/// Handle `GET /health`.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sensor_types: catalog::all().len(),
    })
}

/// Subrouter with the `/health` route, generic over the gateway state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
