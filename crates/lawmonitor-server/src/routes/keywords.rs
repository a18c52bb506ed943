use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use lawmonitor_core::{Keyword, NewKeyword};

use crate::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/keywords", get(list_keywords).post(add_keyword))
        .route("/api/keywords/{keyword_id}", delete(delete_keyword))
}

async fn list_keywords(State(state): State<AppState>) -> Result<Json<Vec<Keyword>>, AppError> {
    Ok(Json(state.monitor.list_keywords().await?))
}

async fn add_keyword(
    State(state): State<AppState>,
    Json(input): Json<NewKeyword>,
) -> Result<(StatusCode, Json<Keyword>), AppError> {
    let keyword = state.monitor.add_keyword(input).await?;
    Ok((StatusCode::CREATED, Json(keyword)))
}

async fn delete_keyword(
    State(state): State<AppState>,
    Path(keyword_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.monitor.delete_keyword(keyword_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
