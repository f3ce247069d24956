//! Axum route handlers for the rewrite screen.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::AppError;
use crate::rewrite::prompts::DEFAULT_REWRITE_INSTRUCTION;
use crate::state::AppState;
use crate::wizard::view::RewriteView;
use crate::wizard::Screen;

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub text: String,
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub original_text: String,
    /// `None` when the rewrite failed; the screen simply returns to idle.
    pub rewritten_text: Option<String>,
}

/// GET /api/v1/rewrite
pub async fn handle_get_rewrite(State(state): State<AppState>) -> Json<RewriteView> {
    state.wizard.navigate(Screen::Rewrite).await;
    Json(RewriteView::from_analysis(
        state.session.analysis().await.as_ref(),
    ))
}

/// POST /api/v1/rewrite
///
/// Blank input is a validation error. Model failures are logged and answered
/// with no rewritten text rather than an error.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Text to rewrite cannot be empty".to_string(),
        ));
    }

    let instruction = request
        .instruction
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .unwrap_or(DEFAULT_REWRITE_INSTRUCTION);

    let rewritten_text = match state.assistant.rewrite(&request.text, instruction).await {
        Ok(text) => Some(text),
        Err(e) => {
            error!("Rewrite failed: {e}");
            None
        }
    };

    Ok(Json(RewriteResponse {
        original_text: request.text,
        rewritten_text,
    }))
}
