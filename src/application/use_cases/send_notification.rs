use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::application::{MessagingClient, NotificationLockRepository};
use crate::domain::{DomainError, Topic, TopicMessage, NOTIFICATION_LOCK};

/// Use case for the hourly topic notification.
///
/// Takes the notification lock for the current UTC hour, then publishes the
/// JST time to the topic. A held lock aborts the run before anything is sent.
pub struct SendNotificationUseCase {
    lock_repo: Arc<dyn NotificationLockRepository>,
    client: Arc<dyn MessagingClient>,
    topic: Topic,
}

impl SendNotificationUseCase {
    pub fn new(
        lock_repo: Arc<dyn NotificationLockRepository>,
        client: Arc<dyn MessagingClient>,
    ) -> Self {
        Self {
            lock_repo,
            client,
            topic: Topic::sample(),
        }
    }

    pub async fn execute(&self, now: DateTime<Utc>) -> Result<String, DomainError> {
        self.lock_repo
            .try_acquire(NOTIFICATION_LOCK, now)
            .await
            .inspect_err(|e| error!("Failed to take notification lock: {}", e))?;

        let message = TopicMessage::hourly(self.topic.clone(), now);

        let message_id = self
            .client
            .send(&message)
            .await
            .inspect_err(|e| error!("Failed to send notification: {}", e))?;

        info!("result: {}", message_id);
        Ok(message_id)
    }
}
