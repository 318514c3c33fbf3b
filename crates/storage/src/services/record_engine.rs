//! Record computation over the chronological history of one event.
//!
//! Every scope (world, each continent, each country) is scanned day by day while
//! keeping the running minimum. A result sets a record when it equals its day's
//! minimum and that minimum doesn't lose to anything set on an earlier day, so
//! same-day ties and results equalling the standing record all get the tag.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::error::{Result, StorageError};
use crate::models::region::{self, Continent};
use crate::models::{RecordCandidate, RecordTagUpdate, RecordType};

/// Computes the record tag of every candidate for one event, category and metric.
///
/// The world pass is authoritative: continental tags only go to results without
/// a WR, and NR only to results still without a tag. The output is sorted by
/// result id and contains only tagged results.
pub fn compute_record_tags(candidates: &[RecordCandidate]) -> Result<Vec<RecordTagUpdate>> {
    for candidate in candidates {
        validate_candidate(candidate)?;
    }

    let mut tags: BTreeMap<i32, RecordType> = BTreeMap::new();

    for result_id in record_setters(candidates.iter()) {
        tags.insert(result_id, RecordType::WR);
    }

    let mut by_continent: HashMap<&str, Vec<&RecordCandidate>> = HashMap::new();
    let mut by_country: HashMap<&str, Vec<&RecordCandidate>> = HashMap::new();

    for candidate in candidates {
        if let Some(code) = candidate.super_region_code.as_deref() {
            by_continent.entry(code).or_default().push(candidate);
        }
        if let Some(code) = candidate.region_code.as_deref() {
            by_country.entry(code).or_default().push(candidate);
        }
    }

    for (code, group) in by_continent {
        let record_type = Continent::from_code(code)
            .map(|c| c.record_type())
            .ok_or_else(|| StorageError::Computation(format!("Unknown continent: {}", code)))?;

        for result_id in record_setters(group) {
            tags.entry(result_id).or_insert(record_type);
        }
    }

    for group in by_country.into_values() {
        for result_id in record_setters(group) {
            tags.entry(result_id).or_insert(RecordType::NR);
        }
    }

    Ok(tags
        .into_iter()
        .map(|(result_id, record_type)| RecordTagUpdate {
            result_id,
            record_type,
        })
        .collect())
}

/// Ids of the results that set or equalled the record within one scope
fn record_setters<'a>(candidates: impl IntoIterator<Item = &'a RecordCandidate>) -> Vec<i32> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&RecordCandidate>> = BTreeMap::new();
    for candidate in candidates {
        by_date.entry(candidate.date).or_default().push(candidate);
    }

    let mut running_min: Option<i64> = None;
    let mut setters = Vec::new();

    for day in by_date.values() {
        let Some(day_min) = day.iter().map(|c| c.value).min() else {
            continue;
        };

        if running_min.is_none_or(|current| day_min <= current) {
            setters.extend(
                day.iter()
                    .filter(|c| c.value == day_min)
                    .map(|c| c.result_id),
            );
            running_min = Some(day_min);
        }
    }

    setters
}

fn validate_candidate(candidate: &RecordCandidate) -> Result<()> {
    if candidate.value <= 0 {
        return Err(StorageError::Computation(format!(
            "Result {} has non-positive value {}",
            candidate.result_id, candidate.value
        )));
    }

    let continent = match candidate.super_region_code.as_deref() {
        Some(code) => Some(Continent::from_code(code).ok_or_else(|| {
            StorageError::Computation(format!(
                "Result {} has unknown continent code {}",
                candidate.result_id, code
            ))
        })?),
        None => None,
    };

    if let Some(code) = candidate.region_code.as_deref() {
        let country_continent = region::continent_of(code).ok_or_else(|| {
            StorageError::Computation(format!(
                "Result {} has unknown country code {}",
                candidate.result_id, code
            ))
        })?;

        if continent != Some(country_continent) {
            return Err(StorageError::Computation(format!(
                "Result {} has country {} outside of its continent {}",
                candidate.result_id,
                code,
                candidate.super_region_code.as_deref().unwrap_or("(none)")
            )));
        }
    }

    Ok(())
}
