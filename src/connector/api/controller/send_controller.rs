use anyhow::Result;
use chrono::Utc;

use super::super::Container;

pub struct SendController<'a> {
    container: &'a Container,
}

impl<'a> SendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run the hourly notification job once, outside the cron endpoint.
    pub async fn send(&self) -> Result<String> {
        let use_case = self.container.send_notification_use_case();
        let message_id = use_case.execute(Utc::now()).await?;
        Ok(self.format_send_success(&message_id))
    }

    fn format_send_success(&self, message_id: &str) -> String {
        format!(
            "Notification sent via {}: {}",
            self.container.messaging_backend(),
            message_id
        )
    }
}
