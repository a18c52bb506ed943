//! JSON error responses for the API routes.
//!
//! Every body is `{"error": "<message>"}`. Store failures are logged and
//! answered with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lawmonitor_engine::WorkflowError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 422
    #[error("{0}")]
    Validation(String),

    /// 409
    #[error("{0}")]
    Conflict(String),

    /// 502
    #[error("{0}")]
    Upstream(String),

    /// 500. Message is logged but not returned to the client.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                "internal error".to_string()
            }
            Self::Upstream(detail) => {
                tracing::warn!(error = %detail, "registry error");
                self.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotFound { .. } => Self::NotFound(err.to_string()),
            WorkflowError::Validation(msg) => Self::Validation(msg),
            WorkflowError::IllegalTransition(t) => Self::Conflict(t.to_string()),
            WorkflowError::Gateway(e) => Self::Upstream(e.to_string()),
            WorkflowError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}
