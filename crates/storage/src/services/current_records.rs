use chrono::NaiveDate;

use crate::models::{EventResult, Metric, RegionScope};

fn holds_record_at(result: &EventResult, metric: Metric, scope: &RegionScope) -> bool {
    result.approved
        && scope.contains(
            result.region_code.as_deref(),
            result.super_region_code.as_deref(),
        )
        && result
            .record(metric)
            .is_some_and(|tag| scope.implied_by().contains(&tag))
}

/// The latest result that held the record at `scope` on or before `up_to`.
///
/// A world record also counts as a continental and national record, so the tags
/// looked at widen as the scope narrows.
pub fn current_record<'a>(
    results: &'a [EventResult],
    metric: Metric,
    scope: &RegionScope,
    up_to: NaiveDate,
    exclude_result_id: Option<i32>,
) -> Option<&'a EventResult> {
    results
        .iter()
        .filter(|r| r.date <= up_to && Some(r.result_id) != exclude_result_id)
        .filter(|r| holds_record_at(r, metric, scope))
        .max_by_key(|r| (r.date, std::cmp::Reverse(r.value(metric)), r.result_id))
}

/// Every result currently sharing the record at `scope`, earliest first
pub fn record_holders<'a>(
    results: &'a [EventResult],
    metric: Metric,
    scope: &RegionScope,
    up_to: NaiveDate,
) -> Vec<&'a EventResult> {
    let Some(record) = current_record(results, metric, scope, up_to, None) else {
        return Vec::new();
    };
    let record_value = record.value(metric);

    let mut holders: Vec<&EventResult> = results
        .iter()
        .filter(|r| r.date <= up_to && r.value(metric) == record_value)
        .filter(|r| holds_record_at(r, metric, scope))
        .collect();
    holders.sort_by_key(|r| (r.date, r.result_id));
    holders
}
