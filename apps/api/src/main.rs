mod analysis;
mod assistant;
mod config;
mod errors;
mod intake;
mod llm_client;
mod rewrite;
mod routes;
mod session;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::{GeminiAssistant, ResumeAssistant};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::wizard::Wizard;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client. A missing key is reported on the first model call.
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; analysis and rewrite calls will fail");
    }
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let assistant: Arc<dyn ResumeAssistant> = Arc::new(GeminiAssistant(llm));

    // One session for the lifetime of the process
    let session = SessionStore::new();
    let wizard = Wizard::new(
        session.clone(),
        assistant.clone(),
        Duration::from_millis(config.analysis_tick_ms),
    );

    // Build app state
    let state = AppState {
        session,
        wizard,
        assistant,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
