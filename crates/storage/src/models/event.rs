use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_format", rename_all = "lowercase")]
pub enum EventFormat {
    Time,
    Number,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "round_format")]
pub enum RoundFormat {
    #[serde(rename = "a")]
    #[sqlx(rename = "a")]
    Average,
    #[serde(rename = "m")]
    #[sqlx(rename = "m")]
    Mean,
    #[serde(rename = "3")]
    #[sqlx(rename = "3")]
    BestOf3,
    #[serde(rename = "2")]
    #[sqlx(rename = "2")]
    BestOf2,
    #[serde(rename = "1")]
    #[sqlx(rename = "1")]
    BestOf1,
}

impl RoundFormat {
    pub fn number_of_attempts(&self) -> usize {
        match self {
            Self::Average => 5,
            Self::Mean | Self::BestOf3 => 3,
            Self::BestOf2 => 2,
            Self::BestOf1 => 1,
        }
    }

    pub fn is_best_of(&self) -> bool {
        matches!(self, Self::BestOf3 | Self::BestOf2 | Self::BestOf1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: String,
    pub name: String,
    pub format: EventFormat,
    pub default_round_format: RoundFormat,
    /// Team size, 1 for individual events
    pub participants: i16,
    pub rank: i32,
}

impl Event {
    /// Averages only count towards records and rankings with this many attempts
    pub fn default_number_of_attempts(&self) -> usize {
        self.default_round_format.number_of_attempts()
    }
}
