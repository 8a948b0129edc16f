use anyhow::Result;

use crate::DeviceToken;

use super::super::Container;

pub struct SubscribeController<'a> {
    container: &'a Container,
}

impl<'a> SubscribeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Press the "Subscribe" button once.
    ///
    /// The diagnostic itself is emitted by the container's sink, so nothing is
    /// returned for the caller to print.
    pub async fn subscribe(&self, token: String) -> Result<String> {
        let token = DeviceToken::new(token)?;
        let trigger = self.container.subscription_trigger(token);
        trigger.activate_and_wait().await;
        Ok(String::new())
    }
}
