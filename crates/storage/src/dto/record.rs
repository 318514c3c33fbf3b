use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dto::ranking::{ContestInfo, PersonInfo};
use crate::models::{Attempt, Metric, RecordCategory};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecomputeRecordsRequest {
    pub category: RecordCategory,

    /// Recompute a single event, or every event when absent
    #[validate(length(min = 1, max = 32, message = "event_id must be between 1 and 32 characters"))]
    pub event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FailedUnit {
    pub event_id: String,
    pub category: RecordCategory,
    /// Absent when the whole `(event, category)` pair failed
    pub metric: Option<Metric>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RecordComputationReport {
    pub processed_units: usize,
    pub failed_units: Vec<FailedUnit>,
}

impl RecordComputationReport {
    pub fn merge(&mut self, other: RecordComputationReport) {
        self.processed_units += other.processed_units;
        self.failed_units.extend(other.failed_units);
    }

    pub fn is_success(&self) -> bool {
        self.failed_units.is_empty()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecordsFilter {
    /// Continent or country code (`country:` forces a country), world records when absent
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventInfo {
    pub event_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordEntry {
    pub ranking_id: String,
    pub metric: Metric,
    pub date: NaiveDate,
    pub persons: Vec<PersonInfo>,
    pub result: i64,
    pub attempts: Vec<Attempt>,
    pub contest: Option<ContestInfo>,
    pub video_link: Option<String>,
    pub discussion_link: Option<String>,
}

/// Current records of one event: every tied single first, then every tied average
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventRecords {
    pub event: EventInfo,
    pub records: Vec<RecordEntry>,
}
