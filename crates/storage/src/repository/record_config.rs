use sqlx::PgPool;

use crate::error::Result;
use crate::models::{RecordCategory, RecordConfig};

pub struct RecordConfigRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecordConfigRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record configs of a category, failing when any record type is left unconfigured
    pub async fn get_for_category(&self, category: RecordCategory) -> Result<Vec<RecordConfig>> {
        let configs = sqlx::query_as::<_, RecordConfig>(
            r#"
            SELECT record_type_id, category, label, color
            FROM record_configs
            WHERE category = $1
            "#,
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        RecordConfig::ensure_complete(category, &configs)?;

        Ok(configs)
    }
}
