use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub person_id: i32,
    pub name: String,
    pub localized_name: Option<String>,
    pub region_code: String,
    pub wca_id: Option<String>,
}
