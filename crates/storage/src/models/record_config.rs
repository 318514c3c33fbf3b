use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{Result, StorageError};
use crate::models::{RecordCategory, RecordType};

/// Display configuration of one record type within a category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecordConfig {
    pub record_type_id: RecordType,
    pub category: RecordCategory,
    pub label: String,
    pub color: String,
}

impl RecordConfig {
    /// Every record type needs exactly one config in the category, otherwise records
    /// for that category can't be computed.
    pub fn ensure_complete(category: RecordCategory, configs: &[RecordConfig]) -> Result<()> {
        let in_category: Vec<&RecordConfig> =
            configs.iter().filter(|c| c.category == category).collect();

        let missing: Vec<&str> = RecordType::ALL
            .iter()
            .filter(|rt| !in_category.iter().any(|c| c.record_type_id == **rt))
            .map(|rt| rt.as_str())
            .collect();

        if in_category.len() != RecordType::ALL.len() || !missing.is_empty() {
            return Err(StorageError::Configuration(format!(
                "The records are configured incorrectly for '{}'. Expected {} record configs, but found {} (missing: {})",
                category,
                RecordType::ALL.len(),
                in_category.len(),
                if missing.is_empty() {
                    "none".to_string()
                } else {
                    missing.join(", ")
                }
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs_for(category: RecordCategory) -> Vec<RecordConfig> {
        RecordType::ALL
            .iter()
            .map(|rt| RecordConfig {
                record_type_id: *rt,
                category,
                label: rt.as_str().to_string(),
                color: "#10c010".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_complete_configuration() {
        let configs = configs_for(RecordCategory::Meetups);
        assert!(RecordConfig::ensure_complete(RecordCategory::Meetups, &configs).is_ok());
    }

    #[test]
    fn test_missing_record_type() {
        let mut configs = configs_for(RecordCategory::Competitions);
        configs.retain(|c| c.record_type_id != RecordType::OcR);

        let err = RecordConfig::ensure_complete(RecordCategory::Competitions, &configs).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(msg) if msg.contains("OcR")));
    }

    #[test]
    fn test_configs_of_other_category_dont_count() {
        let configs = configs_for(RecordCategory::Competitions);
        assert!(RecordConfig::ensure_complete(RecordCategory::VideoBased, &configs).is_err());
    }
}
