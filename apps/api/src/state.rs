use std::sync::Arc;

use crate::assistant::ResumeAssistant;
use crate::config::Config;
use crate::session::SessionStore;
use crate::wizard::Wizard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The one session this process serves.
    pub session: SessionStore,
    pub wizard: Wizard,
    /// Pluggable model backend. Default: GeminiAssistant.
    pub assistant: Arc<dyn ResumeAssistant>,
}
