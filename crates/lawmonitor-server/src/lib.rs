//! HTTP surface for lawmonitor.
//!
//! - `/api/law/search`, `/api/law/detail/{id}`: registry relay (XML)
//! - `/api/*`: JSON API over the monitoring workflow
//! - everything else: static dashboard assets, with `index.html` as the
//!   fallback for unknown paths

mod error;
mod routes;
mod state;

pub use error::{AppError, ErrorBody};
pub use state::AppState;

use std::path::Path;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the full application router.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    routes::router()
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
