pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod traits;

pub use error::{Result, StorageError};
pub use traits::RecordStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Shared handle on the Postgres pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
