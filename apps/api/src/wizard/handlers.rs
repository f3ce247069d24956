//! Axum route handlers for wizard navigation and the analyzing/results screens.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::view::ScreenView;
use crate::wizard::Screen;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub screen: Screen,
}

/// GET /api/v1/wizard
pub async fn handle_get_wizard(State(state): State<AppState>) -> Json<ScreenView> {
    Json(state.wizard.view().await)
}

/// POST /api/v1/wizard/navigate
///
/// Guarded navigation. The returned view is the screen actually shown, which is
/// `upload` when the requested screen's state is missing.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Json<ScreenView> {
    let from = state.wizard.screen().await;
    let shown = state.wizard.navigate(request.screen).await;
    debug!(
        "Navigate {:?} -> {:?} (requested {:?})",
        from, shown, request.screen
    );
    Json(state.wizard.view().await)
}

/// POST /api/v1/analysis
///
/// "Start Analysis". Accepted runs answer 202 with the analyzing view; poll
/// GET /api/v1/wizard until the screen changes.
pub async fn handle_start_analysis(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ScreenView>), AppError> {
    state.wizard.start_analysis().await?;
    Ok((StatusCode::ACCEPTED, Json(state.wizard.view().await)))
}

/// GET /api/v1/analysis
///
/// Direct navigation to the analyzing screen: starts a run when arriving from
/// elsewhere with a document, redirects to upload without one.
pub async fn handle_get_analysis(State(state): State<AppState>) -> Json<ScreenView> {
    state.wizard.navigate(Screen::Analyzing).await;
    Json(state.wizard.view().await)
}

/// GET /api/v1/results
pub async fn handle_get_results(State(state): State<AppState>) -> Json<ScreenView> {
    state.wizard.navigate(Screen::Results).await;
    Json(state.wizard.view().await)
}
