use sqlx::PgPool;
use storage::{
    dto::record::{EventRecords, RecomputeRecordsRequest, RecordComputationReport},
    error::Result,
    models::RecordCategory,
    repository::record::RecordRepository,
    services::record_computation,
};

/// Current records of every event in a category
pub async fn get_records(
    pool: &PgPool,
    category: RecordCategory,
    region: Option<&str>,
) -> Result<Vec<EventRecords>> {
    let repo = RecordRepository::new(pool);
    repo.get_event_records(category, region).await
}

/// Recompute the records of one event, or of every event in the category
pub async fn recompute_records(
    pool: &PgPool,
    request: &RecomputeRecordsRequest,
) -> Result<RecordComputationReport> {
    match request.event_id.as_deref() {
        Some(event_id) => {
            record_computation::compute_records(pool, event_id, request.category).await
        }
        None => record_computation::compute_all_records(pool, Some(request.category)).await,
    }
}
