use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ANALYSIS_TICK_MS: u64 = 1500;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential is optional at startup: a missing key surfaces as a
/// transport error on the first model call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Cadence of the cosmetic progress ticker on the analyzing screen.
    pub analysis_tick_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("API_KEY")),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis_tick_ms: parse_tick_ms(optional_env("ANALYSIS_TICK_MS"))?,
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The ticker needs a non-zero period.
fn parse_tick_ms(raw: Option<String>) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_ANALYSIS_TICK_MS);
    };
    let tick_ms = raw
        .parse::<u64>()
        .context("ANALYSIS_TICK_MS must be a whole number of milliseconds")?;
    if tick_ms == 0 {
        bail!("ANALYSIS_TICK_MS must be greater than zero");
    }
    Ok(tick_ms)
}
