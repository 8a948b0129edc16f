//! Cron-triggered job endpoint.
//!
//! `GET /_job` runs the hourly notification job. Only requests carrying the
//! scheduler header `X-Appengine-Cron: true` are accepted. The endpoint
//! always answers 200 with a plain `done` or `error` body.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use chrono::Utc;
use tracing::{info, warn};

use super::api::Container;

pub const CRON_HEADER: &str = "X-Appengine-Cron";
pub const JOB_PATH: &str = "/_job";
pub const DEFAULT_PORT: u16 = 8080;

const DONE: &str = "done";
const ERROR: &str = "error";

/// Port from `$PORT`, defaulting to 8080.
pub fn port_from_env() -> u16 {
    match std::env::var("PORT") {
        Ok(p) => p.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid PORT value '{}', using {}", p, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route(JOB_PATH, get(run_job))
        .with_state(container)
}

pub async fn serve(container: Arc<Container>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Job server listening on http://{}{}", addr, JOB_PATH);
    axum::serve(listener, router(container)).await?;
    Ok(())
}

async fn run_job(State(container): State<Arc<Container>>, headers: HeaderMap) -> &'static str {
    let from_cron = headers
        .get(CRON_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true");
    if !from_cron {
        return ERROR;
    }

    // the use case logs its own failures
    match container
        .send_notification_use_case()
        .execute(Utc::now())
        .await
    {
        Ok(_) => DONE,
        Err(_) => ERROR,
    }
}
