use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::MessagingClient;
use crate::domain::{DeviceToken, DomainError, Topic, TopicMessage};

pub const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";
pub const DEFAULT_IID_BASE_URL: &str = "https://iid.googleapis.com";
const BATCH_ADD_PATH: &str = "/iid/v1:batchAdd";

#[derive(Serialize)]
struct BatchAddRequest<'a> {
    to: String,
    registration_tokens: Vec<&'a str>,
}

#[derive(Deserialize)]
struct BatchAddResponse {
    #[serde(default)]
    results: Vec<BatchAddResult>,
}

#[derive(Deserialize)]
struct BatchAddResult {
    error: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: WireMessage<'a>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    topic: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<WireNotification<'a>>,
    #[serde(skip_serializing_if = "is_empty_map")]
    data: &'a BTreeMap<String, String>,
}

fn is_empty_map(map: &&BTreeMap<String, String>) -> bool {
    map.is_empty()
}

#[derive(Serialize)]
struct WireNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

/// Connection settings for Firebase Cloud Messaging.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub project_id: Option<String>,
    pub access_token: String,
    pub fcm_base_url: String,
    pub iid_base_url: String,
}

impl FcmConfig {
    /// Read settings from the environment:
    ///
    /// | Variable           | Default                      |
    /// |--------------------|------------------------------|
    /// | `FCM_ACCESS_TOKEN` | required                     |
    /// | `FCM_PROJECT_ID`   | unset (needed only to send)  |
    /// | `FCM_BASE_URL`     | `https://fcm.googleapis.com` |
    /// | `IID_BASE_URL`     | `https://iid.googleapis.com` |
    pub fn from_env() -> Result<Self, DomainError> {
        let access_token = std::env::var("FCM_ACCESS_TOKEN")
            .map_err(|_| DomainError::config("FCM_ACCESS_TOKEN is not set"))?;
        Ok(Self {
            project_id: std::env::var("FCM_PROJECT_ID").ok(),
            access_token,
            fcm_base_url: std::env::var("FCM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FCM_BASE_URL.to_string()),
            iid_base_url: std::env::var("IID_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IID_BASE_URL.to_string()),
        })
    }
}

/// HTTP client for the Firebase push backend.
///
/// Topic subscription goes through the Instance ID batch API; sends go
/// through the FCM HTTP v1 API. Every round trip is logged at debug level.
pub struct FcmMessagingClient {
    client: reqwest::Client,
    access_token: String,
    batch_add_url: String,
    send_url: Option<String>,
}

impl FcmMessagingClient {
    pub fn new(config: FcmConfig) -> Self {
        let iid = config.iid_base_url.trim_end_matches('/');
        let fcm = config.fcm_base_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            access_token: config.access_token,
            batch_add_url: format!("{iid}{BATCH_ADD_PATH}"),
            send_url: config
                .project_id
                .map(|p| format!("{fcm}/v1/projects/{p}/messages:send")),
        }
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Ok(Self::new(FcmConfig::from_env()?))
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        iid: bool,
    ) -> Result<String, DomainError> {
        debug!(
            "req: POST {} {}",
            url,
            serde_json::to_string(body).unwrap_or_default()
        );

        let mut request = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body);
        if iid {
            request = request.header("access_token_auth", "true");
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::messaging(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        debug!("resp: {} {}", status, text);

        if !status.is_success() {
            warn!("Messaging backend returned {status}: {text}");
            return Err(DomainError::messaging(format!(
                "backend returned {status}: {text}"
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl MessagingClient for FcmMessagingClient {
    async fn subscribe_to_topic(
        &self,
        token: &DeviceToken,
        topic: &Topic,
    ) -> Result<(), DomainError> {
        let request = BatchAddRequest {
            to: topic.path(),
            registration_tokens: vec![token.as_str()],
        };

        let body = self.post(&self.batch_add_url, &request, true).await?;
        let parsed: BatchAddResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::messaging(format!("failed to parse response: {e}")))?;

        match parsed.results.into_iter().find_map(|r| r.error) {
            Some(err) => Err(DomainError::messaging(format!(
                "subscribe to {} rejected: {}",
                topic, err
            ))),
            None => Ok(()),
        }
    }

    async fn send(&self, message: &TopicMessage) -> Result<String, DomainError> {
        let url = self
            .send_url
            .as_deref()
            .ok_or_else(|| DomainError::config("FCM_PROJECT_ID is required to send messages"))?;

        let request = SendRequest {
            message: WireMessage {
                topic: message.topic().name(),
                notification: message.notification().map(|n| WireNotification {
                    title: &n.title,
                    body: &n.body,
                }),
                data: message.data(),
            },
        };

        let body = self.post(url, &request, false).await?;
        let parsed: SendResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::messaging(format!("failed to parse response: {e}")))?;
        Ok(parsed.name)
    }

    fn backend_name(&self) -> &str {
        "fcm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(project: Option<&str>) -> FcmConfig {
        FcmConfig {
            project_id: project.map(str::to_string),
            access_token: "token".to_string(),
            fcm_base_url: "https://fcm.example/".to_string(),
            iid_base_url: "https://iid.example".to_string(),
        }
    }

    #[test]
    fn urls_are_built_from_base() {
        let client = FcmMessagingClient::new(config(Some("demo")));
        assert_eq!(client.batch_add_url, "https://iid.example/iid/v1:batchAdd");
        assert_eq!(
            client.send_url.as_deref(),
            Some("https://fcm.example/v1/projects/demo/messages:send")
        );
    }

    #[tokio::test]
    async fn send_without_project_is_a_config_error() {
        let client = FcmMessagingClient::new(config(None));
        let err = client
            .send(&TopicMessage::new(Topic::sample()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConfigError(_)));
    }

    #[test]
    fn wire_message_matches_v1_shape() {
        let msg = TopicMessage::new(Topic::sample())
            .with_notification("t", "b")
            .with_data("data", "x");
        let request = SendRequest {
            message: WireMessage {
                topic: msg.topic().name(),
                notification: msg.notification().map(|n| WireNotification {
                    title: &n.title,
                    body: &n.body,
                }),
                data: msg.data(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": {
                    "topic": "sample",
                    "notification": {"title": "t", "body": "b"},
                    "data": {"data": "x"}
                }
            })
        );
    }

    #[test]
    fn batch_add_errors_are_detected() {
        let parsed: BatchAddResponse =
            serde_json::from_str(r#"{"results":[{"error":"NOT_FOUND"}]}"#).unwrap();
        assert_eq!(parsed.results[0].error.as_deref(), Some("NOT_FOUND"));

        let ok: BatchAddResponse = serde_json::from_str(r#"{"results":[{}]}"#).unwrap();
        assert!(ok.results[0].error.is_none());
    }
}
