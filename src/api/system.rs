//! Health endpoints backing liveness and readiness probes.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}

/// GET /health/live
pub async fn health_live(State(state): State<Arc<AppState>>) -> Json<HealthLiveResponse> {
    Json(HealthLiveResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
    })
}

/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthReadyResponse> {
    let database = state.store().ping().await.is_ok();

    Json(HealthReadyResponse {
        ready: database,
        checks: HealthReadinessChecks { database },
    })
}
