use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "contest_type", rename_all = "kebab-case")]
pub enum ContestType {
    Meetup,
    WcaComp,
    Comp,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contest {
    pub competition_id: String,
    pub short_name: String,
    pub contest_type: ContestType,
    pub region_code: Option<String>,
}
