use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::StorageError;

/// Record tags, from the strongest to the weakest scope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
    sqlx::Type,
)]
#[sqlx(type_name = "record_type")]
pub enum RecordType {
    WR,
    ER,
    NAR,
    SAR,
    AsR,
    AfR,
    OcR,
    NR,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        Self::WR,
        Self::ER,
        Self::NAR,
        Self::SAR,
        Self::AsR,
        Self::AfR,
        Self::OcR,
        Self::NR,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WR => "WR",
            Self::ER => "ER",
            Self::NAR => "NAR",
            Self::SAR => "SAR",
            Self::AsR => "AsR",
            Self::AfR => "AfR",
            Self::OcR => "OcR",
            Self::NR => "NR",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Independent pools of results. A result only competes for records inside its own category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
    sqlx::Type,
)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "record_category", rename_all = "kebab-case")]
pub enum RecordCategory {
    Competitions,
    Meetups,
    VideoBased,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 3] = [Self::Competitions, Self::Meetups, Self::VideoBased];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Competitions => "competitions",
            Self::Meetups => "meetups",
            Self::VideoBased => "video-based",
        }
    }
}

impl std::str::FromStr for RecordCategory {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                StorageError::InvalidInput(format!(
                    "Unknown record category: '{}'. Available: competitions, meetups, video-based",
                    s
                ))
            })
    }
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Single,
    Average,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Self::Single, Self::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Average => "average",
        }
    }

    pub fn value_column(&self) -> &'static str {
        match self {
            Self::Single => "best",
            Self::Average => "average",
        }
    }

    pub fn record_column(&self) -> &'static str {
        match self {
            Self::Single => "regional_single_record",
            Self::Average => "regional_average_record",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A result eligible for a record, reduced to what the record scan needs
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RecordCandidate {
    pub result_id: i32,
    pub date: NaiveDate,
    pub value: i64,
    pub region_code: Option<String>,
    pub super_region_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTagUpdate {
    pub result_id: i32,
    pub record_type: RecordType,
}
