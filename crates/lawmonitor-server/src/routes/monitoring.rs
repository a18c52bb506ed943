//! Dashboard snapshot, on-demand sweep, and the monitoring log.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lawmonitor_core::MonitoringLog;
use lawmonitor_engine::{DashboardSnapshot, DetectionReport};
use serde::Deserialize;

use crate::{AppError, AppState};

const DEFAULT_LOG_LIMIT: usize = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/sweep", post(sweep))
        .route("/api/logs", get(logs))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSnapshot>, AppError> {
    Ok(Json(state.monitor.dashboard().await?))
}

async fn sweep(State(state): State<AppState>) -> Result<Json<DetectionReport>, AppError> {
    Ok(Json(state.monitor.run_sweep().await?))
}

#[derive(Debug, Deserialize)]
struct LogQuery {
    limit: Option<usize>,
}

async fn logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<MonitoringLog>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    Ok(Json(state.monitor.recent_logs(limit).await?))
}
