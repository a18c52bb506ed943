use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lawmonitor_core::{Law, LawSummary};
use lawmonitor_engine::Promotion;
use lawmonitor_store::LawFilter;
use serde::Deserialize;

use crate::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/laws", get(list_laws).post(track_law))
        .route("/api/laws/search", get(search_registry))
        .route("/api/laws/{law_id}", get(get_law))
}

#[derive(Debug, Default, Deserialize)]
struct LawQuery {
    /// Partial match on name or content.
    q: Option<String>,
    active: Option<bool>,
}

async fn list_laws(
    State(state): State<AppState>,
    Query(query): Query<LawQuery>,
) -> Result<Json<Vec<Law>>, AppError> {
    let laws = match query.q {
        Some(q) if !q.trim().is_empty() => state.monitor.search_tracked(&q).await?,
        _ => {
            let filter = LawFilter {
                active: query.active,
                ..LawFilter::default()
            };
            state.monitor.list_laws(&filter).await?
        }
    };
    Ok(Json(laws))
}

#[derive(Debug, Deserialize)]
struct TrackRequest {
    law_id: String,
}

async fn track_law(
    State(state): State<AppState>,
    Json(req): Json<TrackRequest>,
) -> Result<(StatusCode, Json<Promotion>), AppError> {
    let promotion = state.monitor.track_law(&req.law_id).await?;
    Ok((StatusCode::CREATED, Json(promotion)))
}

#[derive(Debug, Deserialize)]
struct RegistrySearch {
    query: String,
}

async fn search_registry(
    State(state): State<AppState>,
    Query(search): Query<RegistrySearch>,
) -> Result<Json<Vec<LawSummary>>, AppError> {
    Ok(Json(state.monitor.search_registry(&search.query).await?))
}

async fn get_law(
    State(state): State<AppState>,
    Path(law_id): Path<String>,
) -> Result<Json<Law>, AppError> {
    Ok(Json(state.monitor.get_law(&law_id).await?))
}
