use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Служебные поля записи
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Удалённые записи остаются в таблице и скрываются из выборок
    pub is_deleted: bool,
    /// Растёт при каждом сохранении
    pub version: i32,
}

impl EntityMetadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            version: 0,
        }
    }

    pub fn record_write(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_write_bumps_version_and_timestamp() {
        let mut metadata = EntityMetadata::new();
        let created = metadata.created_at;
        metadata.record_write();
        metadata.record_write();
        assert_eq!(metadata.version, 2);
        assert_eq!(metadata.created_at, created);
        assert!(metadata.updated_at >= created);
        assert!(!metadata.is_deleted);
    }
}
