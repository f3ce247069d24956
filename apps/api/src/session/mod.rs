//! Session store — the single mutable aggregate shared by every screen.
//!
//! One store per process, created in `main` and injected through `AppState`.
//! Each accessor takes the lock for the duration of one read or replace.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::analysis::models::AnalysisResult;
use crate::intake::Document;

#[derive(Debug, Default)]
pub struct SessionState {
    pub document: Option<Document>,
    pub job_description: String,
    pub analysis: Option<AnalysisResult>,
    pub analyzing: bool,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn document(&self) -> Option<Document> {
        self.inner.read().await.document.clone()
    }

    /// Replaces the résumé. A stored analysis belongs to the previous document,
    /// so it is dropped in the same write.
    pub async fn replace_document(&self, document: Document) {
        let mut state = self.inner.write().await;
        if state.analysis.take().is_some() {
            debug!("Cleared analysis result superseded by new upload");
        }
        state.document = Some(document);
    }

    pub async fn job_description(&self) -> String {
        self.inner.read().await.job_description.clone()
    }

    pub async fn replace_job_description(&self, text: String) {
        self.inner.write().await.job_description = text;
    }

    pub async fn analysis(&self) -> Option<AnalysisResult> {
        self.inner.read().await.analysis.clone()
    }

    pub async fn replace_analysis(&self, analysis: AnalysisResult) {
        self.inner.write().await.analysis = Some(analysis);
    }

    pub async fn is_analyzing(&self) -> bool {
        self.inner.read().await.analyzing
    }

    pub async fn set_analyzing(&self, analyzing: bool) {
        self.inner.write().await.analyzing = analyzing;
    }
}
