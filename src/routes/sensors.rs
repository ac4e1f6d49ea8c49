//! Sensor catalog, for the app's sensor picker.

use axum::{routing::get, Json, Router};

use crate::catalog::{self, SensorTypeInfo};

// ---

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/sensors", get(list_sensors))
}

/// Handle `GET /sensors`.
async fn list_sensors() -> Json<&'static [SensorTypeInfo]> {
    Json(catalog::all())
}
