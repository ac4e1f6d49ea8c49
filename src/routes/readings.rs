use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, SharedService};
use crate::{AnalysisError, Location, NewReading, Reading, Report, SensorType, TreeStore};

// ---

pub fn router<S: TreeStore>() -> Router<SharedService<S>> {
    // ---
    Router::new().route(
        "/users/{user_id}/readings",
        get(list_readings::<S>).post(submit_reading::<S>),
    )
}

/// Body of `POST /users/{user_id}/readings`.
#[derive(Debug, Deserialize)]
pub struct SubmitReading {
    sensor_type: String,
    value: f64,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Serialize)]
pub struct Submitted {
    reading: Reading,
    report: Report,
}

/// Record a reading and generate its report, as the app's submit form does.
async fn submit_reading<S: TreeStore>(
    Path(user_id): Path<String>,
    State(service): State<SharedService<S>>,
    Json(body): Json<SubmitReading>,
) -> Result<(StatusCode, Json<Submitted>), ApiError> {
    // ---
    info!("POST /users/{}/readings - {}", user_id, body.sensor_type);

    let reading = service
        .record_reading(NewReading {
            user_id,
            sensor_type: body.sensor_type,
            value: body.value,
            notes: body.notes,
            location: body.location,
        })
        .await?;
    let report = service.generate_report(&reading).await?;

    Ok((StatusCode::CREATED, Json(Submitted { reading, report })))
}

/// Query parameters for listing readings
#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    sensor_type: Option<String>,
}

async fn list_readings<S: TreeStore>(
    Path(user_id): Path<String>,
    Query(params): Query<ReadingsQuery>,
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    // ---
    let sensor_type = params
        .sensor_type
        .as_deref()
        .map(str::parse::<SensorType>)
        .transpose()
        .map_err(AnalysisError::from)?;

    let readings = service.list_readings(&user_id, sensor_type).await?;
    Ok(Json(readings))
}
