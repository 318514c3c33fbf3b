use sqlx::PgPool;

use crate::dto::record::{FailedUnit, RecordComputationReport};
use crate::error::Result;
use crate::models::{Event, Metric, RecordCategory};
use crate::repository::event::EventRepository;
use crate::repository::record_config::RecordConfigRepository;
use crate::repository::result::PgRecordStore;
use crate::services::record_engine::compute_record_tags;
use crate::traits::RecordStore;

/// Recomputes the single and average records of one `(event, category)` pair from scratch.
///
/// All three scopes of a metric are computed before anything is written, so a metric
/// that fails to compute keeps its previous tags and is reported in the returned
/// failures. Store errors are propagated.
pub async fn recompute_unit<S>(
    store: &mut S,
    event: &Event,
    category: RecordCategory,
) -> Result<RecordComputationReport>
where
    S: RecordStore + ?Sized,
{
    let mut report = RecordComputationReport::default();

    for metric in Metric::ALL {
        let candidates = store
            .fetch_record_candidates(event, category, metric)
            .await?;

        match compute_record_tags(&candidates) {
            Ok(updates) => {
                store
                    .write_record_tags(&event.event_id, category, metric, &updates)
                    .await?;

                tracing::debug!(
                    "{} {} records for {}: {} candidates, {} tagged",
                    category,
                    metric,
                    event.event_id,
                    candidates.len(),
                    updates.len()
                );
                report.processed_units += 1;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to compute {} {} records for {}: {}",
                    category,
                    metric,
                    event.event_id,
                    e
                );
                report.failed_units.push(FailedUnit {
                    event_id: event.event_id.clone(),
                    category,
                    metric: Some(metric),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Recomputes one `(event, category)` pair as a single unit of the store.
///
/// Any error leaves the unit uncommitted.
pub async fn recompute_pair<S>(
    store: &mut S,
    event: &Event,
    category: RecordCategory,
) -> Result<RecordComputationReport>
where
    S: RecordStore + ?Sized,
{
    store.begin_unit(&event.event_id, category).await?;
    let report = recompute_unit(store, event, category).await?;
    store.commit_unit().await?;

    Ok(report)
}

/// Recomputes every `(event, category)` pair, isolating failures per pair.
///
/// A pair that fails as a whole is logged and reported with no metric; the run
/// carries on with the next pair.
pub async fn recompute_pairs<S>(
    store: &mut S,
    events: &[Event],
    categories: &[RecordCategory],
) -> RecordComputationReport
where
    S: RecordStore + ?Sized,
{
    let mut report = RecordComputationReport::default();

    for category in categories.iter().copied() {
        tracing::info!("Recomputing {} records for {} events", category, events.len());

        for event in events {
            match recompute_pair(store, event, category).await {
                Ok(unit_report) => report.merge(unit_report),
                Err(e) => {
                    tracing::error!(
                        "Record recomputation failed for {} ({}): {}",
                        event.event_id,
                        category,
                        e
                    );
                    report.failed_units.push(FailedUnit {
                        event_id: event.event_id.clone(),
                        category,
                        metric: None,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    tracing::info!(
        "Record recomputation finished: {} units processed, {} failed",
        report.processed_units,
        report.failed_units.len()
    );

    report
}

/// Recomputes the records of one event in one category.
///
/// An incomplete record configuration for the category fails the whole operation.
pub async fn compute_records(
    pool: &PgPool,
    event_id: &str,
    category: RecordCategory,
) -> Result<RecordComputationReport> {
    RecordConfigRepository::new(pool)
        .get_for_category(category)
        .await?;

    let event = EventRepository::new(pool).find_by_id(event_id).await?;

    recompute_pair(&mut PgRecordStore::new(pool), &event, category).await
}

/// Recomputes the records of every event, in one category or in all of them.
///
/// Failures are isolated per `(event, category)` pair and collected in the report.
pub async fn compute_all_records(
    pool: &PgPool,
    category: Option<RecordCategory>,
) -> Result<RecordComputationReport> {
    let categories = match category {
        Some(category) => vec![category],
        None => RecordCategory::ALL.to_vec(),
    };

    let config_repo = RecordConfigRepository::new(pool);
    for category in &categories {
        config_repo.get_for_category(*category).await?;
    }

    let events = EventRepository::new(pool).list().await?;

    Ok(recompute_pairs(&mut PgRecordStore::new(pool), &events, &categories).await)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sqlx::types::Json;

    use super::*;
    use crate::error::StorageError;
    use crate::models::region::derive_result_regions;
    use crate::models::{
        Attempt, EventFormat, EventResult, RecordCandidate, RecordTagUpdate, RecordType,
        RoundFormat,
    };
    use crate::repository::memory::MemoryResultStore;
    use crate::services::metrics::compute_best_and_average;

    fn event() -> Event {
        event_with_id("333")
    }

    fn event_with_id(event_id: &str) -> Event {
        Event {
            event_id: event_id.to_string(),
            name: format!("Event {}", event_id),
            format: EventFormat::Time,
            default_round_format: RoundFormat::Average,
            participants: 1,
            rank: 10,
        }
    }

    fn result(result_id: i32, date: u32, times: &[i64], countries: &[&str]) -> EventResult {
        let attempts: Vec<Attempt> = times.iter().copied().map(Attempt::new).collect();
        let (best, average) =
            compute_best_and_average(&attempts, RoundFormat::Average, EventFormat::Time);
        let regions = derive_result_regions(countries).unwrap();

        EventResult {
            result_id,
            event_id: "333".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, date).unwrap(),
            person_ids: (0..countries.len() as i32).map(|i| result_id * 10 + i).collect(),
            attempts: Json(attempts),
            best,
            average,
            region_code: regions.region_code,
            super_region_code: regions.super_region_code,
            record_category: RecordCategory::Competitions,
            regional_single_record: None,
            regional_average_record: None,
            approved: true,
            competition_id: None,
            video_link: None,
            discussion_link: None,
        }
    }

    fn history() -> Vec<EventResult> {
        let mut meetup = result(6, 1, &[500, 500, 500, 500, 500], &["US"]);
        meetup.record_category = RecordCategory::Meetups;
        meetup.regional_single_record = Some(RecordType::NR);

        vec![
            result(1, 1, &[1000, 1100, 1200, 1300, 1400], &["US"]),
            result(2, 2, &[900, 1500, 1500, 1500, 1600], &["DE"]),
            result(3, 3, &[950, 1000, 1050, 1100, 1150], &["FR"]),
            // incomplete round, no average
            result(4, 4, &[1200, 1200, 1200, 1200, 0], &["US"]),
            meetup,
        ]
    }

    fn store() -> MemoryResultStore {
        MemoryResultStore::new(history())
    }

    fn tag(store: &MemoryResultStore, metric: Metric, result_id: i32) -> Option<RecordType> {
        store.record_tags(metric).get(&result_id).copied().flatten()
    }

    #[tokio::test]
    async fn test_recompute_tags_every_scope() {
        let mut store = store();
        let report = recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.processed_units, 2);

        assert_eq!(tag(&store, Metric::Single, 1), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Single, 2), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Single, 3), Some(RecordType::NR));
        assert_eq!(tag(&store, Metric::Single, 4), None);

        assert_eq!(tag(&store, Metric::Average, 1), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Average, 2), Some(RecordType::ER));
        assert_eq!(tag(&store, Metric::Average, 3), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Average, 4), None);

        // other categories are left alone
        assert_eq!(tag(&store, Metric::Single, 6), Some(RecordType::NR));
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let mut store = store();
        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();
        let single = store.record_tags(Metric::Single);
        let average = store.record_tags(Metric::Average);

        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();
        assert_eq!(store.record_tags(Metric::Single), single);
        assert_eq!(store.record_tags(Metric::Average), average);
    }

    #[tokio::test]
    async fn test_corrected_result_moves_records() {
        let mut store = store();
        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();

        if let Some(corrected) = store.result_mut(2) {
            corrected.best = 2000;
        }

        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();
        assert_eq!(tag(&store, Metric::Single, 1), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Single, 2), Some(RecordType::ER));
        assert_eq!(tag(&store, Metric::Single, 3), Some(RecordType::WR));
    }

    #[tokio::test]
    async fn test_unapproved_results_lose_their_tags() {
        let mut store = store();
        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();

        if let Some(rejected) = store.result_mut(1) {
            rejected.approved = false;
        }

        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();
        assert_eq!(tag(&store, Metric::Single, 1), None);
        assert_eq!(tag(&store, Metric::Average, 1), None);
        assert_eq!(tag(&store, Metric::Single, 4), Some(RecordType::NAR));
        assert_eq!(tag(&store, Metric::Average, 2), Some(RecordType::WR));
    }

    #[tokio::test]
    async fn test_failed_metric_keeps_previous_tags() {
        let mut store = store();
        recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();
        let single = store.record_tags(Metric::Single);

        if let Some(broken) = store.result_mut(4) {
            broken.region_code = Some("QQ".to_string());
            broken.best = 100;
        }

        let report = recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();

        assert_eq!(report.processed_units, 1);
        assert_eq!(report.failed_units.len(), 1);
        assert_eq!(report.failed_units[0].metric, Some(Metric::Single));
        assert_eq!(report.failed_units[0].event_id, "333");
        assert_eq!(store.record_tags(Metric::Single), single);
        assert_eq!(tag(&store, Metric::Average, 3), Some(RecordType::WR));
    }

    #[tokio::test]
    async fn test_dnf_attempt_average_can_set_record() {
        let mut store = MemoryResultStore::new(vec![result(
            1,
            1,
            &[1000, -1, 1100, 1200, 1300],
            &["JP"],
        )]);

        let report = recompute_unit(&mut store, &event(), RecordCategory::Competitions)
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(tag(&store, Metric::Single, 1), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Average, 1), Some(RecordType::WR));
    }

    fn broken_pyraminx_result() -> EventResult {
        let mut broken = result(10, 1, &[300, 310, 320, 330, 340], &["US"]);
        broken.event_id = "pyram".to_string();
        broken.region_code = Some("QQ".to_string());
        broken
    }

    #[tokio::test]
    async fn test_failed_event_does_not_stop_the_run() {
        let mut results = history();
        results.push(broken_pyraminx_result());
        let mut store = MemoryResultStore::new(results);

        let events = vec![event_with_id("pyram"), event()];
        let report = recompute_pairs(&mut store, &events, &[RecordCategory::Competitions]).await;

        assert_eq!(report.processed_units, 2);
        assert_eq!(report.failed_units.len(), 2);
        assert!(report.failed_units.iter().all(|f| f.event_id == "pyram"));
        assert_eq!(tag(&store, Metric::Single, 10), None);

        assert_eq!(tag(&store, Metric::Single, 2), Some(RecordType::WR));
        assert_eq!(tag(&store, Metric::Average, 3), Some(RecordType::WR));
    }

    /// Memory store whose units fail to open for one event
    struct UnavailableEventStore {
        inner: MemoryResultStore,
        unavailable_event: &'static str,
    }

    #[async_trait::async_trait]
    impl RecordStore for UnavailableEventStore {
        async fn begin_unit(&mut self, event_id: &str, _category: RecordCategory) -> Result<()> {
            if event_id == self.unavailable_event {
                return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }

        async fn fetch_record_candidates(
            &mut self,
            event: &Event,
            category: RecordCategory,
            metric: Metric,
        ) -> Result<Vec<RecordCandidate>> {
            self.inner
                .fetch_record_candidates(event, category, metric)
                .await
        }

        async fn write_record_tags(
            &mut self,
            event_id: &str,
            category: RecordCategory,
            metric: Metric,
            updates: &[RecordTagUpdate],
        ) -> Result<()> {
            self.inner
                .write_record_tags(event_id, category, metric, updates)
                .await
        }
    }

    #[tokio::test]
    async fn test_store_error_fails_only_its_event() {
        let mut store = UnavailableEventStore {
            inner: store(),
            unavailable_event: "pyram",
        };

        let events = vec![event_with_id("pyram"), event()];
        let report = recompute_pairs(&mut store, &events, &[RecordCategory::Competitions]).await;

        assert_eq!(report.processed_units, 2);
        assert_eq!(
            report.failed_units,
            vec![FailedUnit {
                event_id: "pyram".to_string(),
                category: RecordCategory::Competitions,
                metric: None,
                reason: StorageError::Database(sqlx::Error::PoolTimedOut).to_string(),
            }]
        );
        assert_eq!(tag(&store.inner, Metric::Single, 1), Some(RecordType::WR));
        assert_eq!(tag(&store.inner, Metric::Average, 2), Some(RecordType::ER));
    }
}
