use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::Result;
use crate::models::Person;

pub struct PersonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persons keyed by id; unknown ids are simply absent
    pub async fn find_by_ids(&self, person_ids: &[i32]) -> Result<HashMap<i32, Person>> {
        if person_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let persons = sqlx::query_as::<_, Person>(
            r#"
            SELECT person_id, name, localized_name, region_code, wca_id
            FROM persons
            WHERE person_id = ANY($1)
            "#,
        )
        .bind(person_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(persons.into_iter().map(|p| (p.person_id, p)).collect())
    }
}
