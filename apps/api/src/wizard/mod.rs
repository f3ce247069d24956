//! Wizard controller — Landing → Upload → Analyzing → Results → Rewrite.
//!
//! Owns the current screen, the analyzing run and its cosmetic ticker. Only the
//! settlement of the real analyze call moves the wizard out of `Analyzing`.
//!
//! Lock order: wizard state first, then the session store. Neither is held
//! while the model call is pending.

pub mod handlers;
pub mod progress;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::analysis::models::AnalysisResult;
use crate::assistant::ResumeAssistant;
use crate::errors::AppError;
use crate::intake::Document;
use crate::session::SessionStore;
use crate::wizard::progress::ProgressTicker;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload a resume and provide a job description.";
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. Please ensure your API key is valid and try again.";
pub const RETRY_FROM_UPLOAD_MESSAGE: &str = "Go back to the upload screen to try again.";
pub const DOCUMENT_LOCKED_MESSAGE: &str = "The resume cannot change while an analysis is running.";
pub const JOB_DESCRIPTION_LOCKED_MESSAGE: &str =
    "The job description cannot change while an analysis is running.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    Upload,
    Analyzing,
    Results,
    Rewrite,
}

#[derive(Default)]
struct WizardState {
    screen: Screen,
    /// Validation message shown on the upload screen.
    upload_error: Option<String>,
    /// Set when the current run failed: the Error sub-state of `Analyzing`.
    analysis_error: Option<String>,
    /// Id of the latest run. A settling run whose id differs was abandoned.
    run_id: u64,
    in_flight: bool,
    ticker: Option<ProgressTicker>,
}

#[derive(Clone)]
pub struct Wizard {
    session: SessionStore,
    assistant: Arc<dyn ResumeAssistant>,
    tick: Duration,
    state: Arc<Mutex<WizardState>>,
}

impl Wizard {
    pub fn new(session: SessionStore, assistant: Arc<dyn ResumeAssistant>, tick: Duration) -> Self {
        Self {
            session,
            assistant,
            tick,
            state: Arc::new(Mutex::new(WizardState::default())),
        }
    }

    pub async fn screen(&self) -> Screen {
        self.state.lock().await.screen
    }

    /// User- or URL-driven navigation. Returns the screen actually shown.
    ///
    /// `Analyzing` without a document and `Results` without a result redirect to
    /// `Upload`. Entering `Analyzing` with a document starts a run; re-entering it
    /// while already there (running or failed) changes nothing.
    pub async fn navigate(&self, target: Screen) -> Screen {
        let mut state = self.state.lock().await;

        if target == Screen::Analyzing && state.screen == Screen::Analyzing {
            return Screen::Analyzing;
        }

        let resolved = match target {
            Screen::Analyzing if self.session.document().await.is_none() => Screen::Upload,
            Screen::Results if self.session.analysis().await.is_none() => Screen::Upload,
            other => other,
        };
        if resolved != target {
            info!("Redirecting {:?} -> {:?}: required state missing", target, resolved);
        }

        if state.screen == Screen::Analyzing {
            self.leave_analyzing(&mut state).await;
        }
        if resolved == Screen::Upload {
            state.upload_error = None;
        }

        state.screen = resolved;
        if resolved == Screen::Analyzing {
            self.begin_run(&mut state).await;
        }
        resolved
    }

    /// "Start Analysis" on the upload screen.
    ///
    /// Requires a document and a non-blank job description; otherwise the wizard
    /// stays on (or returns to) `Upload` with the validation message. From
    /// `Analyzing` nothing starts: a running analysis keeps running, and a failed
    /// one is only left by going back to `Upload`.
    pub async fn start_analysis(&self) -> Result<Screen, AppError> {
        let mut state = self.state.lock().await;

        if state.screen == Screen::Analyzing {
            if state.in_flight {
                return Ok(Screen::Analyzing);
            }
            return Err(AppError::Validation(RETRY_FROM_UPLOAD_MESSAGE.to_string()));
        }

        let has_document = self.session.document().await.is_some();
        let has_job_description = !self.session.job_description().await.trim().is_empty();
        if !has_document || !has_job_description {
            state.screen = Screen::Upload;
            state.upload_error = Some(MISSING_INPUT_MESSAGE.to_string());
            return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }

        state.upload_error = None;
        state.screen = Screen::Analyzing;
        self.begin_run(&mut state).await;
        Ok(Screen::Analyzing)
    }

    /// Stores an accepted upload. Refused while a run is in flight.
    ///
    /// Checked and applied under the wizard lock, so no run can start between the
    /// check and the replace. A result shown on `Results` belongs to the previous
    /// document, so the wizard goes back to `Upload`.
    pub async fn replace_document(&self, document: Document) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if state.in_flight {
            return Err(AppError::Validation(DOCUMENT_LOCKED_MESSAGE.to_string()));
        }

        self.session.replace_document(document).await;
        state.upload_error = None;
        if state.screen == Screen::Results {
            info!("Results invalidated by a new upload; returning to upload");
            state.screen = Screen::Upload;
        }
        Ok(())
    }

    pub async fn replace_job_description(&self, text: String) -> Result<(), AppError> {
        let state = self.state.lock().await;
        if state.in_flight {
            return Err(AppError::Validation(
                JOB_DESCRIPTION_LOCKED_MESSAGE.to_string(),
            ));
        }
        self.session.replace_job_description(text).await;
        Ok(())
    }

    /// Records a rejected upload so the upload screen can show it.
    pub async fn report_upload_error(&self, message: &str) {
        let mut state = self.state.lock().await;
        state.upload_error = Some(message.to_string());
    }

    async fn begin_run(&self, state: &mut WizardState) {
        let Some(document) = self.session.document().await else {
            state.screen = Screen::Upload;
            return;
        };
        let job_description = self.session.job_description().await;

        state.run_id += 1;
        let run_id = state.run_id;
        state.in_flight = true;
        state.analysis_error = None;
        state.ticker = Some(ProgressTicker::start(self.tick));
        self.session.set_analyzing(true).await;

        info!(
            "Starting analysis run {run_id}: {} ({} bytes)",
            document.file_name,
            document.size()
        );

        let wizard = self.clone();
        tokio::spawn(async move {
            let outcome = wizard
                .assistant
                .analyze(&document.bytes, document.kind.mime_type(), &job_description)
                .await;
            wizard.settle(run_id, outcome).await;
        });
    }

    /// Abandons an in-flight run. Its result is discarded when it arrives.
    async fn leave_analyzing(&self, state: &mut WizardState) {
        if state.in_flight {
            info!("Abandoning analysis run {}", state.run_id);
            state.in_flight = false;
            self.session.set_analyzing(false).await;
        }
        state.ticker = None;
        state.analysis_error = None;
    }

    async fn settle(&self, run_id: u64, outcome: Result<AnalysisResult, AppError>) {
        let mut state = self.state.lock().await;

        if state.run_id != run_id || !state.in_flight {
            debug!("Discarding result of abandoned analysis run {run_id}");
            return;
        }
        state.in_flight = false;
        if let Some(ticker) = &state.ticker {
            ticker.stop();
        }

        match outcome {
            Ok(result) => {
                self.session.replace_analysis(result).await;
                self.session.set_analyzing(false).await;
                state.screen = Screen::Results;
                info!("Analysis run {run_id} complete");
            }
            Err(e) => {
                error!("Analysis run {run_id} failed: {e}");
                self.session.set_analyzing(false).await;
                state.analysis_error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio::sync::Notify;

    use crate::analysis::models::tests::sample_analysis;
    use crate::assistant::testing::{Scripted, ScriptedAssistant};
    use crate::intake::accept_upload;

    const TICK: Duration = Duration::from_millis(1500);
    const JD: &str = "Senior Backend Engineer, Go, distributed systems";

    fn wizard_with(assistant: Arc<ScriptedAssistant>) -> (Wizard, SessionStore) {
        let session = SessionStore::new();
        (Wizard::new(session.clone(), assistant, TICK), session)
    }

    fn text_document(body: &'static str) -> Document {
        accept_upload("cv.txt", Some("text/plain"), Bytes::from_static(body.as_bytes())).unwrap()
    }

    async fn upload(session: &SessionStore, body: &'static str) {
        session.replace_document(text_document(body)).await;
    }

    /// Lets spawned tasks run to their next await point.
    async fn settle_tasks() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_starts_on_landing_and_moves_to_upload() {
        let (wizard, _) = wizard_with(Arc::new(ScriptedAssistant::new()));
        assert_eq!(wizard.screen().await, Screen::Landing);
        assert_eq!(wizard.navigate(Screen::Upload).await, Screen::Upload);
    }

    #[tokio::test]
    async fn test_start_without_document_stays_on_upload() {
        let assistant = Arc::new(ScriptedAssistant::new());
        let (wizard, session) = wizard_with(assistant.clone());
        wizard.navigate(Screen::Upload).await;
        session.replace_job_description(JD.to_string()).await;

        match wizard.start_analysis().await {
            Err(AppError::Validation(msg)) => assert_eq!(msg, MISSING_INPUT_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(wizard.screen().await, Screen::Upload);
        assert_eq!(assistant.analyze_count().await, 0);
    }

    #[tokio::test]
    async fn test_start_with_blank_job_description_is_rejected() {
        let assistant = Arc::new(ScriptedAssistant::new());
        let (wizard, session) = wizard_with(assistant.clone());
        wizard.navigate(Screen::Upload).await;
        upload(&session, "resume").await;
        session.replace_job_description("   ".to_string()).await;

        assert!(wizard.start_analysis().await.is_err());
        assert_eq!(wizard.screen().await, Screen::Upload);
        assert_eq!(assistant.analyze_count().await, 0);
    }

    #[tokio::test]
    async fn test_successful_run_stores_result_then_shows_results() {
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Ready(Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        wizard.navigate(Screen::Upload).await;
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;

        assert_eq!(wizard.start_analysis().await.unwrap(), Screen::Analyzing);
        settle_tasks().await;

        assert_eq!(wizard.screen().await, Screen::Results);
        assert_eq!(session.analysis().await, Some(sample_analysis()));
        assert!(!session.is_analyzing().await);

        let calls = assistant.analyze_calls.lock().await;
        assert_eq!(calls[0].0, b"resume".to_vec());
        assert_eq!(calls[0].1, "text/plain");
        assert_eq!(calls[0].2, JD);
    }

    #[tokio::test]
    async fn test_failed_run_enters_error_substate() {
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Ready(Err(AppError::Transport("down".to_string()))))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;

        wizard.start_analysis().await.unwrap();
        settle_tasks().await;

        assert_eq!(wizard.screen().await, Screen::Analyzing);
        assert_eq!(
            wizard.state.lock().await.analysis_error.as_deref(),
            Some(ANALYSIS_FAILED_MESSAGE)
        );
        assert!(session.analysis().await.is_none());
        assert!(!session.is_analyzing().await);

        // Re-entering the error screen does not retry.
        assert_eq!(wizard.navigate(Screen::Analyzing).await, Screen::Analyzing);
        settle_tasks().await;
        assert_eq!(assistant.analyze_count().await, 1);

        // Recovery is going back to upload.
        assert_eq!(wizard.navigate(Screen::Upload).await, Screen::Upload);
        assert!(wizard.state.lock().await.analysis_error.is_none());
    }

    #[tokio::test]
    async fn test_analyzing_without_document_redirects_to_upload() {
        let assistant = Arc::new(ScriptedAssistant::new());
        let (wizard, session) = wizard_with(assistant.clone());

        assert_eq!(wizard.navigate(Screen::Analyzing).await, Screen::Upload);
        assert!(wizard.state.lock().await.ticker.is_none());
        assert!(!session.is_analyzing().await);
        assert_eq!(assistant.analyze_count().await, 0);
    }

    #[tokio::test]
    async fn test_results_without_analysis_redirects_to_upload() {
        let (wizard, _) = wizard_with(Arc::new(ScriptedAssistant::new()));
        assert_eq!(wizard.navigate(Screen::Results).await, Screen::Upload);
    }

    #[tokio::test]
    async fn test_direct_navigation_to_analyzing_runs_with_placeholder_job_description() {
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Ready(Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        upload(&session, "resume").await;

        assert_eq!(wizard.navigate(Screen::Analyzing).await, Screen::Analyzing);
        settle_tasks().await;

        assert_eq!(wizard.screen().await, Screen::Results);
        assert_eq!(assistant.analyze_calls.lock().await[0].2, "");
    }

    #[tokio::test]
    async fn test_results_to_rewrite_is_unconditional() {
        let (wizard, session) = wizard_with(Arc::new(ScriptedAssistant::new()));
        session.replace_analysis(sample_analysis()).await;
        assert_eq!(wizard.navigate(Screen::Results).await, Screen::Results);
        assert_eq!(wizard.navigate(Screen::Rewrite).await, Screen::Rewrite);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_clamps_while_request_outlasts_it() {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Gated(gate.clone(), Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant);
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;
        wizard.start_analysis().await.unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        {
            let state = wizard.state.lock().await;
            assert_eq!(state.screen, Screen::Analyzing);
            let ticker = state.ticker.as_ref().unwrap();
            assert_eq!(ticker.current_step(), progress::ANALYSIS_STEPS.len() - 1);
        }
        assert!(session.is_analyzing().await);

        gate.notify_one();
        settle_tasks().await;
        assert_eq!(wizard.screen().await, Screen::Results);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_request_completes_before_ticker() {
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Ready(Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant);
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;
        wizard.start_analysis().await.unwrap();
        settle_tasks().await;

        let state = wizard.state.lock().await;
        assert_eq!(state.screen, Screen::Results);
        assert_eq!(state.ticker.as_ref().unwrap().current_step(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_run_result_is_discarded() {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Gated(gate.clone(), Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant);
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;
        wizard.start_analysis().await.unwrap();
        settle_tasks().await;

        assert_eq!(wizard.navigate(Screen::Upload).await, Screen::Upload);
        assert!(!session.is_analyzing().await);

        gate.notify_one();
        settle_tasks().await;

        assert_eq!(wizard.screen().await, Screen::Upload);
        assert!(session.analysis().await.is_none());
    }

    #[tokio::test]
    async fn test_second_start_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Gated(gate.clone(), Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;

        wizard.start_analysis().await.unwrap();
        wizard.start_analysis().await.unwrap();
        settle_tasks().await;
        assert_eq!(assistant.analyze_count().await, 1);

        gate.notify_one();
        settle_tasks().await;
        assert_eq!(wizard.screen().await, Screen::Results);
    }

    #[tokio::test]
    async fn test_start_from_error_substate_does_not_retry() {
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Ready(Err(AppError::Transport("down".to_string()))))
            .await;
        assistant
            .push_analysis(Scripted::Ready(Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        upload(&session, "resume").await;
        session.replace_job_description(JD.to_string()).await;
        wizard.start_analysis().await.unwrap();
        settle_tasks().await;

        match wizard.start_analysis().await {
            Err(AppError::Validation(msg)) => assert_eq!(msg, RETRY_FROM_UPLOAD_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
        settle_tasks().await;
        assert_eq!(assistant.analyze_count().await, 1);
        assert_eq!(wizard.screen().await, Screen::Analyzing);
        assert!(session.analysis().await.is_none());

        // Back on upload, a fresh start is accepted.
        wizard.navigate(Screen::Upload).await;
        wizard.start_analysis().await.unwrap();
        settle_tasks().await;
        assert_eq!(assistant.analyze_count().await, 2);
        assert_eq!(wizard.screen().await, Screen::Results);
    }

    #[tokio::test]
    async fn test_upload_refused_while_run_in_flight() {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(ScriptedAssistant::new());
        assistant
            .push_analysis(Scripted::Gated(gate.clone(), Ok(sample_analysis())))
            .await;
        let (wizard, session) = wizard_with(assistant.clone());
        upload(&session, "OLD resume").await;
        session.replace_job_description(JD.to_string()).await;
        wizard.start_analysis().await.unwrap();

        match wizard.replace_document(text_document("NEW resume")).await {
            Err(AppError::Validation(msg)) => assert_eq!(msg, DOCUMENT_LOCKED_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(wizard
            .replace_job_description("Other".to_string())
            .await
            .is_err());

        gate.notify_one();
        settle_tasks().await;

        // The stored result and the stored document belong together.
        assert_eq!(
            session.document().await.unwrap().bytes,
            Bytes::from_static(b"OLD resume")
        );
        assert_eq!(assistant.analyze_calls.lock().await[0].0, b"OLD resume".to_vec());
        assert!(session.analysis().await.is_some());
        assert_eq!(session.job_description().await, JD);

        wizard.replace_document(text_document("NEW resume")).await.unwrap();
        assert!(session.analysis().await.is_none());
    }

    #[tokio::test]
    async fn test_upload_on_results_returns_to_upload() {
        let (wizard, session) = wizard_with(Arc::new(ScriptedAssistant::new()));
        upload(&session, "first").await;
        session.replace_analysis(sample_analysis()).await;
        assert_eq!(wizard.navigate(Screen::Results).await, Screen::Results);

        wizard.replace_document(text_document("second")).await.unwrap();

        assert_eq!(wizard.screen().await, Screen::Upload);
        assert!(session.analysis().await.is_none());
    }

    #[tokio::test]
    async fn test_upload_clears_upload_error() {
        let (wizard, _) = wizard_with(Arc::new(ScriptedAssistant::new()));
        wizard.navigate(Screen::Upload).await;
        wizard.report_upload_error("bad file").await;

        wizard.replace_document(text_document("resume")).await.unwrap();
        assert!(wizard.state.lock().await.upload_error.is_none());
    }
}
