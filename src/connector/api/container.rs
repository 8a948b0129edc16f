use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{DiagnosticSink, MessagingClient, NotificationLockRepository};
use crate::{
    ConsoleDiagnostics, DeviceToken, DiagnosticMode, DuckdbNotificationLockRepository,
    FcmMessagingClient, InMemoryNotificationLockRepository, MockMessagingClient,
    SendNotificationUseCase, SubscriptionTrigger,
};

pub struct ContainerConfig {
    pub data_dir: String,
    pub mock_messaging: bool,
    pub memory_storage: bool,
    /// Report `Subscribed!` even when the backend rejects the request.
    pub legacy_diagnostics: bool,
}

impl ContainerConfig {
    pub fn diagnostic_mode(&self) -> DiagnosticMode {
        if self.legacy_diagnostics {
            DiagnosticMode::Legacy
        } else {
            DiagnosticMode::Strict
        }
    }
}

pub struct Container {
    messaging_client: Arc<dyn MessagingClient>,
    lock_repo: Arc<dyn NotificationLockRepository>,
    diagnostics: Arc<dyn DiagnosticSink>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let messaging_client: Arc<dyn MessagingClient> = if config.mock_messaging {
            debug!("Using mock messaging client");
            Arc::new(MockMessagingClient::new())
        } else {
            debug!("Using Firebase Cloud Messaging client");
            Arc::new(FcmMessagingClient::from_env()?)
        };

        let lock_repo: Arc<dyn NotificationLockRepository> = if config.memory_storage {
            debug!("Using in-memory lock storage");
            Arc::new(InMemoryNotificationLockRepository::new())
        } else {
            let db_path = PathBuf::from(&config.data_dir).join("topicpush.duckdb");
            // The lock must outlive this process; failing to open it is fatal.
            let repo = DuckdbNotificationLockRepository::new(&db_path)?;
            debug!("Using DuckDB lock storage at {:?}", db_path);
            Arc::new(repo)
        };

        Ok(Self {
            messaging_client,
            lock_repo,
            diagnostics: Arc::new(ConsoleDiagnostics::new()),
            config,
        })
    }

    /// Assemble from ready-made components.
    pub fn with_components(
        config: ContainerConfig,
        messaging_client: Arc<dyn MessagingClient>,
        lock_repo: Arc<dyn NotificationLockRepository>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            messaging_client,
            lock_repo,
            diagnostics,
            config,
        }
    }

    pub fn subscription_trigger(&self, token: DeviceToken) -> SubscriptionTrigger {
        SubscriptionTrigger::new(
            self.messaging_client.clone(),
            self.diagnostics.clone(),
            token,
        )
        .with_mode(self.config.diagnostic_mode())
    }

    pub fn send_notification_use_case(&self) -> SendNotificationUseCase {
        SendNotificationUseCase::new(self.lock_repo.clone(), self.messaging_client.clone())
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }

    pub fn messaging_backend(&self) -> &str {
        self.messaging_client.backend_name()
    }
}
