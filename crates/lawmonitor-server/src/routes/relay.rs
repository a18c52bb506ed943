//! Pass-through to the registry for the browser dashboard.
//!
//! Successful responses carry the registry's XML body unmodified. Failures
//! answer with `{"error", "details"}` JSON instead of the API error shape.

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lawmonitor_registry::RegistryError;
use serde::Deserialize;
use serde_json::json;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/law/search", get(search))
        .route("/api/law/detail/{law_id}", get(detail))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "검색어를 입력해주세요." })),
        )
            .into_response();
    };

    match state.registry.search_raw(&query).await {
        Ok(xml) => xml_response(xml),
        Err(e) => relay_failure("법령 검색 중 오류가 발생했습니다.", e),
    }
}

async fn detail(State(state): State<AppState>, Path(law_id): Path<String>) -> Response {
    match state.registry.detail_raw(&law_id).await {
        Ok(xml) => xml_response(xml),
        Err(e) => relay_failure("법령 상세 조회 중 오류가 발생했습니다.", e),
    }
}

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

fn relay_failure(message: &str, err: RegistryError) -> Response {
    tracing::error!(error = %err, "registry relay failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message, "details": err.to_string() })),
    )
        .into_response()
}
