use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, Part};
use crate::rewrite::prompts::build_rewrite_prompt;

/// Returned when the model answers without any text.
pub const REWRITE_FALLBACK: &str = "Could not generate rewrite.";

/// Rewrites a résumé snippet following `instruction` with one free-text model call.
///
/// An answer with no text soft-degrades to `REWRITE_FALLBACK`; transport failures
/// are returned to the caller.
pub async fn rewrite_section(
    llm: &LlmClient,
    original_text: &str,
    instruction: &str,
) -> Result<String, AppError> {
    if original_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Text to rewrite cannot be empty".to_string(),
        ));
    }

    let parts = [Part::text(build_rewrite_prompt(original_text, instruction))];
    match llm.call_text(&parts).await? {
        Some(text) => {
            info!("Rewrite complete: {} chars", text.len());
            Ok(text)
        }
        None => {
            warn!("Rewrite returned no text, using fallback");
            Ok(REWRITE_FALLBACK.to_string())
        }
    }
}
