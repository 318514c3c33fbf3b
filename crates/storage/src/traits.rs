use crate::error::Result;
use crate::models::{Event, Metric, RecordCandidate, RecordCategory, RecordTagUpdate};

/// Read-then-write access to the results of one `(event, category)` pair while its
/// records are being recomputed.
///
/// Every pair is bracketed by [`RecordStore::begin_unit`] and
/// [`RecordStore::commit_unit`]. Beginning a new unit discards whatever the previous
/// one left uncommitted.
#[async_trait::async_trait]
pub trait RecordStore: Send {
    async fn begin_unit(&mut self, _event_id: &str, _category: RecordCategory) -> Result<()> {
        Ok(())
    }

    /// Approved results with a positive value that meet the metric's attempt
    /// requirement, ordered by date.
    async fn fetch_record_candidates(
        &mut self,
        event: &Event,
        category: RecordCategory,
        metric: Metric,
    ) -> Result<Vec<RecordCandidate>>;

    /// Replaces the whole record column of the metric for the pair: every result
    /// not listed in `updates` loses its tag.
    async fn write_record_tags(
        &mut self,
        event_id: &str,
        category: RecordCategory,
        metric: Metric,
        updates: &[RecordTagUpdate],
    ) -> Result<()>;

    async fn commit_unit(&mut self) -> Result<()> {
        Ok(())
    }
}
