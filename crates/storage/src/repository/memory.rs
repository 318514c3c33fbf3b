use std::collections::HashMap;

use crate::error::Result;
use crate::models::{
    Event, EventResult, Metric, RecordCandidate, RecordCategory, RecordTagUpdate, RecordType,
};
use crate::services::metrics::is_eligible;
use crate::traits::RecordStore;

/// Result store kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    results: Vec<EventResult>,
}

impl MemoryResultStore {
    pub fn new(results: Vec<EventResult>) -> Self {
        Self { results }
    }

    pub fn result_mut(&mut self, result_id: i32) -> Option<&mut EventResult> {
        self.results.iter_mut().find(|r| r.result_id == result_id)
    }

    /// Record tags of every result, keyed by result id
    pub fn record_tags(&self, metric: Metric) -> HashMap<i32, Option<RecordType>> {
        self.results
            .iter()
            .map(|r| (r.result_id, r.record(metric)))
            .collect()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryResultStore {
    async fn fetch_record_candidates(
        &mut self,
        event: &Event,
        category: RecordCategory,
        metric: Metric,
    ) -> Result<Vec<RecordCandidate>> {
        let mut candidates: Vec<RecordCandidate> = self
            .results
            .iter()
            .filter(|r| {
                r.approved
                    && r.event_id == event.event_id
                    && r.record_category == category
                    && is_eligible(r, metric, event)
            })
            .map(|r| RecordCandidate {
                result_id: r.result_id,
                date: r.date,
                value: r.value(metric),
                region_code: r.region_code.clone(),
                super_region_code: r.super_region_code.clone(),
            })
            .collect();

        candidates.sort_by_key(|c| (c.date, c.result_id));
        Ok(candidates)
    }

    async fn write_record_tags(
        &mut self,
        event_id: &str,
        category: RecordCategory,
        metric: Metric,
        updates: &[RecordTagUpdate],
    ) -> Result<()> {
        let tags: HashMap<i32, RecordType> = updates
            .iter()
            .map(|u| (u.result_id, u.record_type))
            .collect();

        for result in self
            .results
            .iter_mut()
            .filter(|r| r.event_id == event_id && r.record_category == category)
        {
            result.set_record(metric, tags.get(&result.result_id).copied());
        }

        Ok(())
    }
}
