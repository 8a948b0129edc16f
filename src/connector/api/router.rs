use anyhow::Result;

use crate::cli::Commands;

use super::container::Container;
use super::controller::{SendController, SubscribeController};

pub struct Router<'a> {
    subscribe_controller: SubscribeController<'a>,
    send_controller: SendController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            subscribe_controller: SubscribeController::new(container),
            send_controller: SendController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Subscribe { token } => self.subscribe_controller.subscribe(token).await,
            Commands::Send => self.send_controller.send().await,
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
