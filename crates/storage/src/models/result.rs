use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::models::{Attempt, Metric, RecordCategory, RecordType};

/// One competitor (or team) performance in an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventResult {
    pub result_id: i32,
    pub event_id: String,
    pub date: NaiveDate,
    pub person_ids: Vec<i32>,
    pub attempts: Json<Vec<Attempt>>,
    pub best: i64,
    pub average: i64,
    pub region_code: Option<String>,
    pub super_region_code: Option<String>,
    pub record_category: RecordCategory,
    pub regional_single_record: Option<RecordType>,
    pub regional_average_record: Option<RecordType>,
    pub approved: bool,
    pub competition_id: Option<String>,
    pub video_link: Option<String>,
    pub discussion_link: Option<String>,
}

impl EventResult {
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Single => self.best,
            Metric::Average => self.average,
        }
    }

    pub fn record(&self, metric: Metric) -> Option<RecordType> {
        match metric {
            Metric::Single => self.regional_single_record,
            Metric::Average => self.regional_average_record,
        }
    }

    pub fn set_record(&mut self, metric: Metric, record: Option<RecordType>) {
        match metric {
            Metric::Single => self.regional_single_record = record,
            Metric::Average => self.regional_average_record = record,
        }
    }

    pub fn counted_attempts(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_counted()).count()
    }
}
