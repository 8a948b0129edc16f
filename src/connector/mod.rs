//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Messaging (Firebase Cloud Messaging over HTTP, in-process mock)
//! - Lock storage (DuckDB, in-memory)
//! - Diagnostics (console, in-memory)
//! - Entry points (CLI controllers, cron job HTTP server)

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
