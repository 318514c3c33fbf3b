use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use crate::dto::record::{EventInfo, EventRecords, RecordEntry};
use crate::error::Result;
use crate::models::{EventResult, Metric, RecordCategory, RegionScope};
use crate::repository::event::EventRepository;
use crate::repository::ranking::Lookups;
use crate::repository::result::ResultRepository;
use crate::services::current_records::record_holders;

pub struct RecordRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecordRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Current records of every event that has one in the category
    pub async fn get_event_records(
        &self,
        category: RecordCategory,
        region: Option<&str>,
    ) -> Result<Vec<EventRecords>> {
        let scope = match region {
            Some(code) => RegionScope::parse(code)?,
            None => RegionScope::World,
        };

        let events = EventRepository::new(self.pool).list().await?;
        let tagged = ResultRepository::new(self.pool)
            .fetch_tagged(category)
            .await?;
        let today = Utc::now().date_naive();

        let mut by_event: HashMap<String, Vec<EventResult>> = HashMap::new();
        for result in tagged {
            by_event
                .entry(result.event_id.clone())
                .or_default()
                .push(result);
        }

        let mut holders_by_event: Vec<(EventInfo, Vec<(Metric, &EventResult)>)> = Vec::new();

        for event in events {
            let Some(event_results) = by_event.get(&event.event_id) else {
                continue;
            };

            let holders: Vec<(Metric, &EventResult)> = Metric::ALL
                .iter()
                .flat_map(|metric| {
                    record_holders(event_results, *metric, &scope, today)
                        .into_iter()
                        .map(move |r| (*metric, r))
                })
                .collect();

            if holders.is_empty() {
                continue;
            }

            holders_by_event.push((
                EventInfo {
                    event_id: event.event_id,
                    name: event.name,
                },
                holders,
            ));
        }

        let holder_results: Vec<&EventResult> = holders_by_event
            .iter()
            .flat_map(|(_, holders)| holders.iter().map(|(_, r)| *r))
            .collect();
        let lookups = Lookups::load(self.pool, holder_results.into_iter()).await?;

        let records = holders_by_event
            .into_iter()
            .map(|(event, holders)| EventRecords {
                event,
                records: holders
                    .into_iter()
                    .map(|(metric, result)| RecordEntry {
                        ranking_id: format!("{}_{}", result.result_id, metric),
                        metric,
                        date: result.date,
                        persons: lookups.persons_of(result),
                        result: result.value(metric),
                        attempts: result.attempts.0.clone(),
                        contest: lookups.contest_of(result),
                        video_link: result.video_link.clone(),
                        discussion_link: result.discussion_link.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(records)
    }
}
