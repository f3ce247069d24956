// Free-text rewriting of résumé snippets.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod prompts;
pub mod rewriter;
