// Résumé analysis: structured scoring of a document against a job description.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod analyzer;
pub mod models;
pub mod prompts;
