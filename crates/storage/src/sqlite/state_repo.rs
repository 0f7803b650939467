use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{StateRepository, StorageError};

use super::SqliteRepository;

impl SqliteRepository {
    /// Number of writes recorded for `key`, or `None` if it was never written.
    ///
    /// Concurrent writers are last-writer-wins; the revision only makes that
    /// observable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    pub async fn revision(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let row = sqlx::query("SELECT revision FROM state_records WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.map(|row| row.try_get::<i64, _>("revision"))
            .transpose()
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

#[async_trait]
impl StateRepository for SqliteRepository {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let row = sqlx::query("SELECT value FROM state_records WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: Vec<u8> = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO state_records (key, value, revision, updated_at)
            VALUES (?1, ?2, 1, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                revision = state_records.revision + 1,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(bytes)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(key, len = bytes.len(), "saved state record");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM state_records WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
