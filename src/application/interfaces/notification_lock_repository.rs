use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DomainError, NotificationLock};

/// Persistence for the hourly notification lock.
#[async_trait]
pub trait NotificationLockRepository: Send + Sync {
    /// Atomically take the lock `name` for `now`.
    ///
    /// Fails with [`DomainError::LockHeld`] when the stored lock was taken in
    /// the same UTC hour; otherwise records `now` and succeeds.
    async fn try_acquire(&self, name: &str, now: DateTime<Utc>) -> Result<(), DomainError>;

    async fn find(&self, name: &str) -> Result<Option<NotificationLock>, DomainError>;
}
