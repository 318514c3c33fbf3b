use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ranking::{RankingEntry, RankingFilter},
    models::Metric,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings/{event_id}/{metric}",
    params(
        ("event_id" = String, Path, description = "Event ID"),
        ("metric" = Metric, Path, description = "single or average"),
        RankingFilter
    ),
    responses(
        (status = 200, description = "Ranking retrieved successfully", body = Vec<RankingEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Event not found")
    ),
    tag = "rankings"
)]
pub async fn get_rankings(
    State(db): State<Database>,
    Path((event_id, metric)): Path<(String, Metric)>,
    Query(filter): Query<RankingFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let entries = services::get_rankings(db.pool(), &event_id, metric, &filter).await?;

    Ok(Json(entries).into_response())
}
