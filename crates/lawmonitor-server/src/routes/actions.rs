use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use lawmonitor_core::{ActionItem, ActionStatus, NewAction, Priority};
use lawmonitor_store::ActionFilter;
use serde::Deserialize;

use crate::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/actions", get(list_actions).post(create_action))
        .route("/api/actions/{action_id}/status", post(advance_status))
        .route("/api/actions/{action_id}/note", put(set_note))
}

#[derive(Debug, Default, Deserialize)]
struct ActionQuery {
    /// Comma-separated statuses, e.g. `PENDING,IN_PROGRESS`.
    status: Option<String>,
    priority: Option<Priority>,
    limit: Option<usize>,
}

impl ActionQuery {
    fn filter(&self) -> Result<ActionFilter, AppError> {
        let statuses = match &self.status {
            Some(list) => Some(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<ActionStatus>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
            None => None,
        };
        Ok(ActionFilter {
            statuses,
            priority: self.priority,
            limit: self.limit,
        })
    }
}

async fn list_actions(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
) -> Result<Json<Vec<ActionItem>>, AppError> {
    let filter = query.filter()?;
    Ok(Json(state.monitor.list_actions(&filter).await?))
}

async fn create_action(
    State(state): State<AppState>,
    Json(input): Json<NewAction>,
) -> Result<(StatusCode, Json<ActionItem>), AppError> {
    let item = state.monitor.create_action(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: ActionStatus,
}

async fn advance_status(
    State(state): State<AppState>,
    Path(action_id): Path<i64>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<ActionItem>, AppError> {
    Ok(Json(
        state.monitor.advance_status(action_id, req.status).await?,
    ))
}

#[derive(Debug, Deserialize)]
struct NoteRequest {
    #[serde(default)]
    notes: String,
}

async fn set_note(
    State(state): State<AppState>,
    Path(action_id): Path<i64>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<ActionItem>, AppError> {
    Ok(Json(state.monitor.set_note(action_id, &req.notes).await?))
}
