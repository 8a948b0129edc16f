mod console_diagnostics;
mod duckdb_notification_lock_repository;
mod fcm_messaging_client;
mod in_memory_notification_lock_repository;
mod memory_diagnostics;
mod mock_messaging_client;

pub use console_diagnostics::*;
pub use duckdb_notification_lock_repository::*;
pub use fcm_messaging_client::*;
pub use in_memory_notification_lock_repository::*;
pub use memory_diagnostics::*;
pub use mock_messaging_client::*;
