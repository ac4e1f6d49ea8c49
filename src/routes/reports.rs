use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, SharedService};
use crate::{Report, TreeStore};

// ---

pub fn router<S: TreeStore>() -> Router<SharedService<S>> {
    // ---
    Router::new()
        .route("/users/{user_id}/reports", get(list_reports::<S>))
        .route("/reports/{report_id}", get(get_report::<S>))
}

/// Query parameters for listing reports
#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    limit: Option<usize>,
}

async fn list_reports<S: TreeStore>(
    Path(user_id): Path<String>,
    Query(params): Query<ReportsQuery>,
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<Report>>, ApiError> {
    // ---
    let reports = service.list_reports(&user_id, params.limit).await?;
    Ok(Json(reports))
}

async fn get_report<S: TreeStore>(
    Path(report_id): Path<Uuid>,
    State(service): State<SharedService<S>>,
) -> Result<Json<Report>, ApiError> {
    // ---
    service
        .get_report(report_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("report {report_id}")))
}
