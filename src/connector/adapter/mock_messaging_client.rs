use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::MessagingClient;
use crate::domain::{DeviceToken, DomainError, Topic, TopicMessage};

/// In-process stand-in for the push backend.
///
/// Records every request. When built with [`MockMessagingClient::failing`]
/// every request is still recorded and then rejected.
pub struct MockMessagingClient {
    subscriptions: Arc<Mutex<Vec<(DeviceToken, Topic)>>>,
    sent: Arc<Mutex<Vec<TopicMessage>>>,
    failure: Option<String>,
}

impl MockMessagingClient {
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(Mutex::new(Vec::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new()
        }
    }

    pub async fn subscriptions(&self) -> Vec<(DeviceToken, Topic)> {
        self.subscriptions.lock().await.clone()
    }

    pub async fn sent(&self) -> Vec<TopicMessage> {
        self.sent.lock().await.clone()
    }

    fn check(&self) -> Result<(), DomainError> {
        match &self.failure {
            Some(reason) => Err(DomainError::messaging(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockMessagingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingClient for MockMessagingClient {
    async fn subscribe_to_topic(
        &self,
        token: &DeviceToken,
        topic: &Topic,
    ) -> Result<(), DomainError> {
        self.subscriptions
            .lock()
            .await
            .push((token.clone(), topic.clone()));
        debug!("Mock subscribe of {:?} to {}", token, topic);
        self.check()
    }

    async fn send(&self, message: &TopicMessage) -> Result<String, DomainError> {
        self.sent.lock().await.push(message.clone());
        self.check()?;
        Ok(format!("projects/mock/messages/{}", Uuid::new_v4()))
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
