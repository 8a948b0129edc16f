use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::{DiagnosticSink, MessagingClient};
use crate::domain::{DeviceToken, DiagnosticMode, SubscriptionOutcome, Topic};

/// Subscribes this device to the `"sample"` topic on each activation.
///
/// The trigger keeps no state between activations: every call issues its own
/// subscribe request and emits exactly one diagnostic when that request
/// completes. Concurrent activations do not coordinate with each other.
#[derive(Clone)]
pub struct SubscriptionTrigger {
    client: Arc<dyn MessagingClient>,
    sink: Arc<dyn DiagnosticSink>,
    token: DeviceToken,
    mode: DiagnosticMode,
}

impl SubscriptionTrigger {
    pub fn new(
        client: Arc<dyn MessagingClient>,
        sink: Arc<dyn DiagnosticSink>,
        token: DeviceToken,
    ) -> Self {
        Self {
            client,
            sink,
            token,
            mode: DiagnosticMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: DiagnosticMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fire-and-forget activation.
    ///
    /// The request runs on the tokio runtime; the returned handle may be
    /// awaited to observe the outcome or dropped.
    pub fn activate(&self) -> JoinHandle<SubscriptionOutcome> {
        let trigger = self.clone();
        tokio::spawn(async move { trigger.activate_and_wait().await })
    }

    /// Runs one activation to completion in the current task.
    pub async fn activate_and_wait(&self) -> SubscriptionOutcome {
        let topic = Topic::sample();
        debug!(
            "Subscribing {:?} to topic {} via {}",
            self.token,
            topic,
            self.client.backend_name()
        );

        let outcome = match self.client.subscribe_to_topic(&self.token, &topic).await {
            Ok(()) => SubscriptionOutcome::succeeded(topic),
            Err(e) => {
                match self.mode {
                    DiagnosticMode::Strict => warn!("Subscribe request failed: {}", e),
                    DiagnosticMode::Legacy => debug!("Subscribe request failed: {}", e),
                }
                SubscriptionOutcome::failed(topic, e.to_string())
            }
        };

        self.sink.emit(&outcome.diagnostic(self.mode));
        outcome
    }
}
