use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid region code: {0}")]
    InvalidRegion(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record computation failed: {0}")]
    Computation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Errors caused by the caller's input rather than by the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidRegion(_) | StorageError::InvalidInput(_)
        )
    }
}
