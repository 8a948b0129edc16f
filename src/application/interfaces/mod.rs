mod diagnostic_sink;
mod messaging_client;
mod notification_lock_repository;

pub use diagnostic_sink::*;
pub use messaging_client::*;
pub use notification_lock_repository::*;
