//! Route table.
//!
//! | Prefix                  | Module        |
//! |-------------------------|---------------|
//! | `/api/law/*`            | `relay`       |
//! | `/api/laws`             | `laws`        |
//! | `/api/changes`          | `changes`     |
//! | `/api/actions`          | `actions`     |
//! | `/api/keywords`         | `keywords`    |
//! | `/api/dashboard`, `/api/sweep`, `/api/logs` | `monitoring` |

use axum::Router;
use axum::routing::get;

use crate::AppState;

mod actions;
mod changes;
mod keywords;
mod laws;
mod monitoring;
mod relay;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(relay::router())
        .merge(laws::router())
        .merge(changes::router())
        .merge(actions::router())
        .merge(keywords::router())
        .merge(monitoring::router())
}
