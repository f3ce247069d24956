//! Axum route handlers for the upload screen.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::intake::accept_upload;
use crate::state::AppState;
use crate::wizard::view::DocumentSummary;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct JobDescriptionRequest {
    pub text: String,
}

/// POST /api/v1/upload
///
/// Multipart upload with a single `file` field. Rejected files never reach the
/// session; the rejection message is also shown on the upload screen. Refused
/// while an analysis is running.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentSummary>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;

    let document = match accept_upload(&file_name, content_type.as_deref(), bytes) {
        Ok(document) => document,
        Err(err) => {
            if let AppError::Validation(msg) = &err {
                warn!("Rejected upload '{file_name}': {msg}");
                state.wizard.report_upload_error(msg).await;
            }
            return Err(err);
        }
    };

    let summary = DocumentSummary::from(&document);
    state.wizard.replace_document(document).await?;
    info!(
        "Accepted upload '{}' ({:?}, {} bytes)",
        summary.file_name, summary.kind, summary.size_bytes
    );

    Ok(Json(summary))
}

/// PUT /api/v1/job-description
pub async fn handle_put_job_description(
    State(state): State<AppState>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<JobDescriptionRequest>, AppError> {
    state
        .wizard
        .replace_job_description(request.text.clone())
        .await?;
    Ok(Json(request))
}
