use async_trait::async_trait;

use crate::domain::{DeviceToken, DomainError, Topic, TopicMessage};

/// The external push backend.
///
/// Implementors own transport, authentication and wire format. Topic
/// registration and delivery happen entirely on the backend side.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Register `token` for delivery on `topic`.
    async fn subscribe_to_topic(
        &self,
        token: &DeviceToken,
        topic: &Topic,
    ) -> Result<(), DomainError>;

    /// Publish `message` and return the backend's message id.
    async fn send(&self, message: &TopicMessage) -> Result<String, DomainError>;

    fn backend_name(&self) -> &str;
}
