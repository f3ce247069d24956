//! Analyzer — scores a résumé document against a job description with one
//! structured model call.

use tracing::{error, info};

use crate::analysis::models::{response_schema, AnalysisResult, RawAnalysis};
use crate::analysis::prompts::build_analyze_prompt;
use crate::errors::AppError;
use crate::intake::{DocumentKind, UNSUPPORTED_TYPE_MESSAGE};
use crate::llm_client::{LlmClient, Part};

/// Sends the document and job description to the model and returns a validated result.
///
/// Fails with `Validation` before any network call when the document is empty or
/// of a disallowed type. Model failures come back as `Transport`, `EmptyResponse`
/// or `SchemaViolation`, unretried.
pub async fn analyze_resume(
    llm: &LlmClient,
    document: &[u8],
    mime_type: &str,
    job_description: &str,
) -> Result<AnalysisResult, AppError> {
    if document.is_empty() {
        return Err(AppError::Validation("Document is empty".to_string()));
    }
    let kind = DocumentKind::from_mime(mime_type)
        .ok_or_else(|| AppError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string()))?;

    let parts = [
        Part::inline_data(kind.mime_type(), document),
        Part::text(build_analyze_prompt(job_description)),
    ];

    let raw: RawAnalysis = llm
        .call_json(&parts, &response_schema())
        .await
        .map_err(|e| {
            error!("AI analysis failed: {e}");
            AppError::from(e)
        })?;

    let result = AnalysisResult::try_from(raw).map_err(|msg| {
        error!("AI analysis returned out-of-contract result: {msg}");
        AppError::SchemaViolation(msg)
    })?;

    info!(
        "Analysis complete: match_score={}, ats_score={}",
        result.match_score, result.ats_score
    );
    Ok(result)
}
