use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::Result;
use crate::models::Contest;

pub struct ContestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContestRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_ids(&self, competition_ids: &[String]) -> Result<HashMap<String, Contest>> {
        if competition_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT competition_id, short_name, contest_type, region_code
            FROM contests
            WHERE competition_id = ANY($1)
            "#,
        )
        .bind(competition_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(contests
            .into_iter()
            .map(|c| (c.competition_id.clone(), c))
            .collect())
    }
}
