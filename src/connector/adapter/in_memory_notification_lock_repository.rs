use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::NotificationLockRepository;
use crate::domain::{DomainError, NotificationLock};

pub struct InMemoryNotificationLockRepository {
    locks: Arc<Mutex<HashMap<String, NotificationLock>>>,
}

impl InMemoryNotificationLockRepository {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryNotificationLockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationLockRepository for InMemoryNotificationLockRepository {
    async fn try_acquire(&self, name: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut locks = self.locks.lock().await;

        if let Some(existing) = locks.get(name) {
            if existing.blocks(now) {
                return Err(DomainError::lock_held(format!(
                    "failed to take lock {} (held since {})",
                    name,
                    existing.date()
                )));
            }
        }

        locks.insert(name.to_string(), NotificationLock::new(name, now));
        debug!("Took lock {} at {}", name, now);
        Ok(())
    }

    async fn find(&self, name: &str) -> Result<Option<NotificationLock>, DomainError> {
        Ok(self.locks.lock().await.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NOTIFICATION_LOCK;
    use chrono::TimeZone;

    #[tokio::test]
    async fn first_acquire_on_empty_store_succeeds() {
        let repo = InMemoryNotificationLockRepository::new();
        let now = Utc.with_ymd_and_hms(2020, 6, 8, 1, 0, 0).unwrap();

        repo.try_acquire(NOTIFICATION_LOCK, now).await.unwrap();

        let lock = repo.find(NOTIFICATION_LOCK).await.unwrap().unwrap();
        assert_eq!(lock.date(), now);
    }

    #[tokio::test]
    async fn held_lock_is_not_overwritten() {
        let repo = InMemoryNotificationLockRepository::new();
        let first = Utc.with_ymd_and_hms(2020, 6, 8, 1, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2020, 6, 8, 1, 45, 0).unwrap();

        repo.try_acquire(NOTIFICATION_LOCK, first).await.unwrap();
        assert!(repo
            .try_acquire(NOTIFICATION_LOCK, second)
            .await
            .unwrap_err()
            .is_lock_held());

        let lock = repo.find(NOTIFICATION_LOCK).await.unwrap().unwrap();
        assert_eq!(lock.date(), first);
    }
}
