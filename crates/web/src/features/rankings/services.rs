use sqlx::PgPool;
use storage::{
    dto::ranking::{RankingEntry, RankingFilter},
    error::Result,
    models::Metric,
    repository::ranking::RankingRepository,
};

/// Get the ranking of one event and metric
pub async fn get_rankings(
    pool: &PgPool,
    event_id: &str,
    metric: Metric,
    filter: &RankingFilter,
) -> Result<Vec<RankingEntry>> {
    let repo = RankingRepository::new(pool);
    repo.get_rankings(event_id, metric, filter).await
}
