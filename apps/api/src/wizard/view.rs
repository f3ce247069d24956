//! Screen views — what each wizard screen renders, as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::models::AnalysisResult;
use crate::intake::{Document, DocumentKind};
use crate::rewrite::prompts::{ADDRESS_WEAKNESS_PREFIX, DEFAULT_REWRITE_INSTRUCTION};
use crate::wizard::progress::{step_views, StepView, ANALYSIS_STEPS};
use crate::wizard::{Screen, Wizard};

/// ATS scores above this render as "good".
const ATS_GOOD_THRESHOLD: u8 = 70;
const FALLBACK_JOB_TITLE: &str = "Candidate";
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Landing,
    Upload(UploadView),
    Analyzing(AnalyzingView),
    Results(ResultsView),
    Rewrite(RewriteView),
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub file_name: String,
    pub kind: DocumentKind,
    pub mime_type: &'static str,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            file_name: doc.file_name.clone(),
            kind: doc.kind,
            mime_type: doc.kind.mime_type(),
            size_bytes: doc.size(),
            uploaded_at: doc.uploaded_at,
            preview_text: doc.preview_text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadView {
    pub document: Option<DocumentSummary>,
    pub job_description: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzingView {
    pub steps: Vec<StepView>,
    pub current_step: usize,
    pub total_steps: usize,
    /// False once the run settled or the last step was reached.
    pub ticking: bool,
    /// Present in the error sub-state; the only way on is back to upload.
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub job_title: String,
    pub match_gap: u8,
    pub ats_band: &'static str,
    pub analysis: AnalysisResult,
}

impl From<AnalysisResult> for ResultsView {
    fn from(analysis: AnalysisResult) -> Self {
        Self {
            job_title: analysis
                .job_title_detected
                .clone()
                .unwrap_or_else(|| FALLBACK_JOB_TITLE.to_string()),
            match_gap: 100 - analysis.match_score,
            ats_band: if analysis.ats_score > ATS_GOOD_THRESHOLD {
                "good"
            } else {
                "fair"
            },
            analysis,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RewriteSuggestion {
    pub weakness: String,
    /// Input text that asks the model to address this weakness.
    pub prefill: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteView {
    pub default_instruction: &'static str,
    pub suggestions: Vec<RewriteSuggestion>,
}

impl RewriteView {
    pub fn from_analysis(analysis: Option<&AnalysisResult>) -> Self {
        let suggestions = analysis
            .map(|a| {
                a.weaknesses
                    .iter()
                    .take(MAX_SUGGESTIONS)
                    .map(|w| RewriteSuggestion {
                        weakness: w.clone(),
                        prefill: format!("{ADDRESS_WEAKNESS_PREFIX}{w}"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            default_instruction: DEFAULT_REWRITE_INSTRUCTION,
            suggestions,
        }
    }
}

impl Wizard {
    /// Renders the current screen.
    pub async fn view(&self) -> ScreenView {
        let state = self.state.lock().await;

        match state.screen {
            Screen::Landing => ScreenView::Landing,
            Screen::Upload => ScreenView::Upload(UploadView {
                document: self.session.document().await.as_ref().map(DocumentSummary::from),
                job_description: self.session.job_description().await,
                error: state.upload_error.clone(),
            }),
            Screen::Analyzing => {
                let ticker = state.ticker.as_ref();
                let current_step = ticker.map_or(0, |t| t.current_step());
                ScreenView::Analyzing(AnalyzingView {
                    steps: step_views(current_step),
                    current_step,
                    total_steps: ANALYSIS_STEPS.len(),
                    ticking: ticker.is_some_and(|t| t.is_running()),
                    error: state.analysis_error.clone(),
                })
            }
            Screen::Results => match self.session.analysis().await {
                Some(analysis) => ScreenView::Results(analysis.into()),
                None => ScreenView::Upload(UploadView {
                    document: self.session.document().await.as_ref().map(DocumentSummary::from),
                    job_description: self.session.job_description().await,
                    error: None,
                }),
            },
            Screen::Rewrite => {
                ScreenView::Rewrite(RewriteView::from_analysis(self.session.analysis().await.as_ref()))
            }
        }
    }
}
