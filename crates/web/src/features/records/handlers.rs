use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::record::{EventRecords, RecomputeRecordsRequest, RecordComputationReport, RecordsFilter},
    models::RecordCategory,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/records/{category}",
    params(
        ("category" = RecordCategory, Path, description = "Record category"),
        RecordsFilter
    ),
    responses(
        (status = 200, description = "Current records retrieved successfully", body = Vec<EventRecords>),
        (status = 400, description = "Unknown region")
    ),
    tag = "records"
)]
pub async fn get_records(
    State(db): State<Database>,
    Path(category): Path<RecordCategory>,
    Query(filter): Query<RecordsFilter>,
) -> Result<Response, WebError> {
    let records = services::get_records(db.pool(), category, filter.region.as_deref()).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/records/recompute",
    request_body = RecomputeRecordsRequest,
    responses(
        (status = 200, description = "Records recomputed, failed units are listed in the report", body = RecordComputationReport),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Record configuration is incomplete")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "records"
)]
pub async fn recompute_records(
    State(db): State<Database>,
    Json(payload): Json<RecomputeRecordsRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let report = services::recompute_records(db.pool(), &payload).await?;

    if !report.is_success() {
        tracing::warn!(
            "Record recomputation for {} finished with {} failed units",
            payload.category,
            report.failed_units.len()
        );
    }

    Ok(Json(report).into_response())
}
