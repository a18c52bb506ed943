use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lawmonitor_engine::{ChangeView, ReviewOutcome, ReviewState};
use serde::Deserialize;

use crate::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/changes", get(list_changes))
        .route("/api/changes/{change_id}/review", post(review_change))
}

#[derive(Debug, Default, Deserialize)]
struct ChangeQuery {
    #[serde(default)]
    status: ReviewState,
    law_id: Option<String>,
    limit: Option<usize>,
}

async fn list_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangeQuery>,
) -> Result<Json<Vec<ChangeView>>, AppError> {
    let mut filter = query.status.filter();
    filter.law_id = query.law_id;
    filter.limit = query.limit;
    Ok(Json(state.monitor.list_changes(&filter).await?))
}

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    #[serde(default)]
    reviewer: String,
}

async fn review_change(
    State(state): State<AppState>,
    Path(change_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, AppError> {
    Ok(Json(
        state.monitor.review_change(change_id, &req.reviewer).await?,
    ))
}
