pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyses/summary",
            post(handlers::handle_summary_download),
        )
        .route("/api/v1/analyses/csv", post(handlers::handle_csv_download))
        .route("/api/v1/match", post(handlers::handle_match))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
