use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Messaging error: {0}")]
    MessagingError(String),

    #[error("Lock held: {0}")]
    LockHeld(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn messaging(msg: impl Into<String>) -> Self {
        Self::MessagingError(msg.into())
    }

    pub fn lock_held(msg: impl Into<String>) -> Self {
        Self::LockHeld(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn is_lock_held(&self) -> bool {
        matches!(self, Self::LockHeld(_))
    }

    pub fn is_messaging_error(&self) -> bool {
        matches!(self, Self::MessagingError(_))
    }
}
