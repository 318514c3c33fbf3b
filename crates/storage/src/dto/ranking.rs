use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Attempt, ContestType, RecordCategory};

/// Hard ceiling on the number of ranks a single ranking request can ask for
pub const MAX_RANKING_ROWS: u32 = 25_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    #[default]
    Persons,
    Results,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    #[default]
    All,
    Competitions,
    Meetups,
    VideoBased,
}

impl CategoryFilter {
    pub fn record_category(&self) -> Option<RecordCategory> {
        match self {
            Self::All => None,
            Self::Competitions => Some(RecordCategory::Competitions),
            Self::Meetups => Some(RecordCategory::Meetups),
            Self::VideoBased => Some(RecordCategory::VideoBased),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RankingFilter {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub show: RankingMode,
    /// Continent or country code, `country:` forces a country (`country:NA`)
    pub region: Option<String>,
    #[serde(default = "default_top_n")]
    pub top_n: u32,
}

fn default_top_n() -> u32 {
    100
}

impl Default for RankingFilter {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            show: RankingMode::Persons,
            region: None,
            top_n: default_top_n(),
        }
    }
}

impl RankingFilter {
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n < 1 || self.top_n > MAX_RANKING_ROWS {
            return Err(format!("top_n must be between 1 and {}", MAX_RANKING_ROWS));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingEntry {
    pub ranking_id: String,
    pub rank: u32,
    pub date: NaiveDate,
    /// Only set for top persons rankings
    pub person_id: Option<i32>,
    pub persons: Vec<PersonInfo>,
    pub result: i64,
    /// Only set for single attempts that have a memo time
    pub memo: Option<i64>,
    pub attempts: Vec<Attempt>,
    pub contest: Option<ContestInfo>,
    pub video_link: Option<String>,
    pub discussion_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonInfo {
    pub person_id: i32,
    pub name: String,
    pub localized_name: Option<String>,
    pub region_code: String,
    pub wca_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContestInfo {
    pub competition_id: String,
    pub short_name: String,
    pub contest_type: ContestType,
    pub region_code: Option<String>,
}
