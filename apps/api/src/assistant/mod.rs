//! Resume assistant — pluggable, trait-based seam between the wizard and the model.
//!
//! Default: `GeminiAssistant`, backed by the shared `LlmClient`.
//! `AppState` holds an `Arc<dyn ResumeAssistant>`, so handlers and the wizard never
//! depend on the provider directly.

use async_trait::async_trait;

use crate::analysis::analyzer::analyze_resume;
use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::rewrite::rewriter::rewrite_section;

#[async_trait]
pub trait ResumeAssistant: Send + Sync {
    async fn analyze(
        &self,
        document: &[u8],
        mime_type: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError>;

    async fn rewrite(&self, original_text: &str, instruction: &str) -> Result<String, AppError>;
}

pub struct GeminiAssistant(pub LlmClient);

#[async_trait]
impl ResumeAssistant for GeminiAssistant {
    async fn analyze(
        &self,
        document: &[u8],
        mime_type: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError> {
        analyze_resume(&self.0, document, mime_type, job_description).await
    }

    async fn rewrite(&self, original_text: &str, instruction: &str) -> Result<String, AppError> {
        rewrite_section(&self.0, original_text, instruction).await
    }
}
