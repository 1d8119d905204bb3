// handlers/public/status.rs - GET /api/status handler

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::config::Environment;

#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub environment: Environment,
    pub uptime_secs: i64,
}

pub async fn api_status(State(state): State<AppState>) -> ApiResponse<StatusInfo> {
    let now = Utc::now();

    ApiResponse::success(StatusInfo {
        status: "ok",
        timestamp: now,
        environment: state.environment,
        uptime_secs: (now - state.started_at).num_seconds(),
    })
}
