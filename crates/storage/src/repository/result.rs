use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{
    Event, EventResult, Metric, RecordCandidate, RecordCategory, RecordTagUpdate, RecordType,
    RegionScope,
};
use crate::traits::RecordStore;

const RESULT_COLUMNS: &str = r#"
    result_id, event_id, date, person_ids, attempts, best, average,
    region_code, super_region_code, record_category,
    regional_single_record, regional_average_record, approved,
    competition_id, video_link, discussion_link
"#;

/// Counts the attempts that aren't empty slots
const COUNTED_ATTEMPTS: &str =
    "(SELECT COUNT(*) FROM jsonb_array_elements(attempts) AS a WHERE (a->>'result')::bigint <> 0)";

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved results of an event with a positive value for the metric
    pub async fn fetch_for_ranking(
        &self,
        event_id: &str,
        metric: Metric,
        category: Option<RecordCategory>,
        region: RegionScope,
    ) -> Result<Vec<EventResult>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(RESULT_COLUMNS);
        query.push(" FROM results WHERE approved AND event_id = ");
        query.push_bind(event_id);
        query.push(" AND ");
        query.push(metric.value_column());
        query.push(" > 0");

        if let Some(category) = category {
            query.push(" AND record_category = ");
            query.push_bind(category);
        }

        match region {
            RegionScope::World => {}
            RegionScope::Continent(continent) => {
                query.push(" AND super_region_code = ");
                query.push_bind(continent.code());
            }
            RegionScope::Country(country) => {
                query.push(" AND region_code = ");
                query.push_bind(country.code);
            }
        }

        query.push(" ORDER BY date, result_id");

        let results: Vec<EventResult> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(results)
    }

    /// Approved results of a category that hold any record tag
    pub async fn fetch_tagged(&self, category: RecordCategory) -> Result<Vec<EventResult>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(RESULT_COLUMNS);
        query.push(
            r#"
            FROM results
            WHERE approved
              AND (regional_single_record IS NOT NULL OR regional_average_record IS NOT NULL)
              AND record_category = "#,
        );
        query.push_bind(category);
        query.push(" ORDER BY date, result_id");

        let results: Vec<EventResult> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(results)
    }
}

/// Record store backed by one Postgres transaction per unit.
///
/// Each unit's transaction holds an advisory lock on the `(event, category)` pair,
/// so two recomputations of the same pair never interleave. Nothing is visible to
/// other connections until [`RecordStore::commit_unit`].
pub struct PgRecordStore<'a> {
    pool: &'a PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl<'a> PgRecordStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool, tx: None }
    }

    fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>> {
        self.tx
            .as_mut()
            .ok_or_else(|| StorageError::Computation("No record unit in progress".to_string()))
    }
}

#[async_trait::async_trait]
impl RecordStore for PgRecordStore<'_> {
    async fn begin_unit(&mut self, event_id: &str, category: RecordCategory) -> Result<()> {
        // an uncommitted transaction rolls back on drop
        self.tx = None;

        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("records:{}:{}", event_id, category))
            .execute(&mut *tx)
            .await?;

        self.tx = Some(tx);
        Ok(())
    }

    async fn commit_unit(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn fetch_record_candidates(
        &mut self,
        event: &Event,
        category: RecordCategory,
        metric: Metric,
    ) -> Result<Vec<RecordCandidate>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT result_id, date, ");
        query.push(metric.value_column());
        query.push(
            r#" AS value, region_code, super_region_code
            FROM results
            WHERE approved AND event_id = "#,
        );
        query.push_bind(event.event_id.as_str());
        query.push(" AND record_category = ");
        query.push_bind(category);
        query.push(" AND ");
        query.push(metric.value_column());
        query.push(" > 0");

        if metric == Metric::Average {
            query.push(" AND ");
            query.push(COUNTED_ATTEMPTS);
            query.push(" = ");
            query.push_bind(event.default_number_of_attempts() as i64);
        }

        query.push(" ORDER BY date, result_id");

        let candidates: Vec<RecordCandidate> =
            query.build_query_as().fetch_all(&mut **self.tx()?).await?;

        Ok(candidates)
    }

    async fn write_record_tags(
        &mut self,
        event_id: &str,
        category: RecordCategory,
        metric: Metric,
        updates: &[RecordTagUpdate],
    ) -> Result<()> {
        let column = metric.record_column();

        let mut clear = QueryBuilder::<Postgres>::new("UPDATE results SET ");
        clear.push(column);
        clear.push(" = NULL WHERE event_id = ");
        clear.push_bind(event_id);
        clear.push(" AND record_category = ");
        clear.push_bind(category);
        clear.push(" AND ");
        clear.push(column);
        clear.push(" IS NOT NULL");
        clear.build().execute(&mut **self.tx()?).await?;

        let mut by_type: BTreeMap<RecordType, Vec<i32>> = BTreeMap::new();
        for update in updates {
            by_type
                .entry(update.record_type)
                .or_default()
                .push(update.result_id);
        }

        for (record_type, result_ids) in by_type {
            let mut query = QueryBuilder::<Postgres>::new("UPDATE results SET ");
            query.push(column);
            query.push(" = ");
            query.push_bind(record_type);
            query.push(" WHERE result_id = ANY(");
            query.push_bind(result_ids);
            query.push(")");
            query.build().execute(&mut **self.tx()?).await?;
        }

        Ok(())
    }
}
