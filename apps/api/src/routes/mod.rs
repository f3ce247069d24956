pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post, put},
    Router,
};

use crate::errors::AppError;
use crate::intake::{self, MAX_DOCUMENT_BYTES};
use crate::rewrite;
use crate::state::AppState;
use crate::wizard;

/// Room for multipart framing on top of the largest accepted document, so the
/// intake check (not the transport limit) decides oversize uploads.
const BODY_LIMIT_BYTES: usize = MAX_DOCUMENT_BYTES + 1024 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard navigation
        .route("/api/v1/wizard", get(wizard::handlers::handle_get_wizard))
        .route(
            "/api/v1/wizard/navigate",
            post(wizard::handlers::handle_navigate),
        )
        // Upload screen
        .route("/api/v1/upload", post(intake::handlers::handle_upload))
        .route(
            "/api/v1/job-description",
            put(intake::handlers::handle_put_job_description),
        )
        // Analyzing / results screens
        .route(
            "/api/v1/analysis",
            post(wizard::handlers::handle_start_analysis).get(wizard::handlers::handle_get_analysis),
        )
        .route("/api/v1/results", get(wizard::handlers::handle_get_results))
        // Rewrite screen
        .route(
            "/api/v1/rewrite",
            get(rewrite::handlers::handle_get_rewrite).post(rewrite::handlers::handle_rewrite),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
