//! # Domain Layer
//!
//! Topics, device tokens, messages and the notification lock.
//! This layer is independent of the messaging backend and of storage.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
