use serde::{Deserialize, Serialize};

use super::Topic;

/// Diagnostic printed when a subscribe request completes.
pub const SUBSCRIBED_MESSAGE: &str = "Subscribed!";

/// How a completed subscribe request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticMode {
    /// Report `Subscribed!` whether or not the backend returned an error.
    Legacy,
    /// Report success and failure with distinct messages.
    #[default]
    Strict,
}

/// What one activation of the subscription trigger observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOutcome {
    topic: Topic,
    error: Option<String>,
}

impl SubscriptionOutcome {
    pub fn succeeded(topic: Topic) -> Self {
        Self { topic, error: None }
    }

    pub fn failed(topic: Topic, error: impl Into<String>) -> Self {
        Self {
            topic,
            error: Some(error.into()),
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The single line reported for this outcome.
    pub fn diagnostic(&self, mode: DiagnosticMode) -> String {
        match (mode, &self.error) {
            (DiagnosticMode::Legacy, _) | (DiagnosticMode::Strict, None) => {
                SUBSCRIBED_MESSAGE.to_string()
            }
            (DiagnosticMode::Strict, Some(err)) => {
                format!("Failed to subscribe to topic {}: {}", self.topic, err)
            }
        }
    }
}
