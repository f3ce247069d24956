// Prompt constants for résumé snippet rewriting.

/// Instruction used when the caller does not supply one.
pub const DEFAULT_REWRITE_INSTRUCTION: &str =
    "Make it punchy, results-oriented, and use strong action verbs.";

/// Rewrite prompt template. Replace `{instruction}` and `{original_text}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = "\
Rewrite the following resume section to be more professional, impactful, and ATS-friendly.
Use action verbs and quantify results where possible.

Instruction: {instruction}

Original Text:
\"{original_text}\"";

/// Prefix used when turning an analysis weakness into rewrite input.
pub const ADDRESS_WEAKNESS_PREFIX: &str = "Rewrite this to address: ";

pub fn build_rewrite_prompt(original_text: &str, instruction: &str) -> String {
    // The instruction slot comes before the original text, so replacing only the
    // first `{instruction}` leaves a literal token inside the user's text intact.
    REWRITE_PROMPT_TEMPLATE
        .replacen("{original_text}", original_text, 1)
        .replacen("{instruction}", instruction, 1)
}
