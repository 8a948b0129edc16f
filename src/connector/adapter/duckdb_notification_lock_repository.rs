use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::NotificationLockRepository;
use crate::domain::{DomainError, NotificationLock};

/// Notification locks stored in a DuckDB file.
///
/// The read-compare-write of [`NotificationLockRepository::try_acquire`] runs
/// inside one transaction while holding the connection mutex, so concurrent
/// job requests in this process cannot both take the same hour.
pub struct DuckdbNotificationLockRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbNotificationLockRepository {
    pub fn new(path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB: {}", e)))?;
        Self::initialize_schema(&conn)?;
        debug!("Opened lock store at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB: {}", e)))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notification_locks (
                name TEXT PRIMARY KEY,
                date_micros BIGINT NOT NULL
            );
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize notification_locks schema: {}", e))
        })?;

        debug!("DuckDB notification_locks table initialized");
        Ok(())
    }

    fn read_lock(conn: &Connection, name: &str) -> Result<Option<NotificationLock>, DomainError> {
        let micros = match conn.query_row(
            "SELECT date_micros FROM notification_locks WHERE name = ?1",
            params![name],
            |row| row.get::<_, i64>(0),
        ) {
            Ok(m) => Some(m),
            Err(duckdb::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read lock {}: {}",
                    name, e
                )))
            }
        };

        match micros {
            Some(m) => NotificationLock::from_timestamp_micros(name, m)
                .map(Some)
                .ok_or_else(|| DomainError::storage(format!("Corrupt timestamp for lock {}", name))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl NotificationLockRepository for DuckdbNotificationLockRepository {
    async fn try_acquire(&self, name: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        if let Some(existing) = Self::read_lock(&tx, name)? {
            if existing.blocks(now) {
                // dropping the transaction rolls it back
                return Err(DomainError::lock_held(format!(
                    "failed to take lock {} (held since {})",
                    name,
                    existing.date()
                )));
            }
        }

        let lock = NotificationLock::new(name, now);
        tx.execute(
            "INSERT OR REPLACE INTO notification_locks (name, date_micros) VALUES (?1, ?2)",
            params![lock.name(), lock.timestamp_micros()],
        )
        .map_err(|e| DomainError::storage(format!("Failed to write lock {}: {}", name, e)))?;

        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!("Took lock {} at {}", name, now);
        Ok(())
    }

    async fn find(&self, name: &str) -> Result<Option<NotificationLock>, DomainError> {
        let conn = self.conn.lock().await;
        Self::read_lock(&conn, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NOTIFICATION_LOCK;
    use chrono::TimeZone;

    #[tokio::test]
    async fn hour_change_releases_lock() {
        let repo = DuckdbNotificationLockRepository::in_memory().unwrap();
        let ten = Utc.with_ymd_and_hms(2020, 6, 8, 10, 0, 0).unwrap();
        let ten_thirty = Utc.with_ymd_and_hms(2020, 6, 8, 10, 30, 0).unwrap();
        let eleven = Utc.with_ymd_and_hms(2020, 6, 8, 11, 0, 0).unwrap();

        repo.try_acquire(NOTIFICATION_LOCK, ten).await.unwrap();
        assert!(repo
            .try_acquire(NOTIFICATION_LOCK, ten_thirty)
            .await
            .unwrap_err()
            .is_lock_held());
        repo.try_acquire(NOTIFICATION_LOCK, eleven).await.unwrap();

        let lock = repo.find(NOTIFICATION_LOCK).await.unwrap().unwrap();
        assert_eq!(lock.date(), eleven);
    }

    #[tokio::test]
    async fn missing_lock_is_none() {
        let repo = DuckdbNotificationLockRepository::in_memory().unwrap();
        assert!(repo.find(NOTIFICATION_LOCK).await.unwrap().is_none());
    }
}
