//! Analysis result — the contract between the structured model call and the rest
//! of the service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm_client::schema::{array_of, integer, object, string};

pub const MAX_SCORE: i64 = 100;

/// A validated analysis. Scores are guaranteed to be in 0–100.
///
/// Only ever built from `RawAnalysis`, never deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_score: u8,
    pub ats_score: u8,
    pub summary: String,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title_detected: Option<String>,
}

/// The model's answer as parsed, before range checks.
///
/// Required fields have no serde default: a missing list or summary fails
/// deserialization instead of turning into an empty value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub match_score: i64,
    pub ats_score: i64,
    pub summary: String,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub job_title_detected: Option<String>,
}

impl TryFrom<RawAnalysis> for AnalysisResult {
    type Error = String;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        Ok(AnalysisResult {
            match_score: score("matchScore", raw.match_score)?,
            ats_score: score("atsScore", raw.ats_score)?,
            summary: raw.summary,
            skills_found: raw.skills_found,
            missing_skills: raw.missing_skills,
            strengths: raw.strengths,
            weaknesses: raw.weaknesses,
            keywords: raw.keywords,
            job_title_detected: raw
                .job_title_detected
                .filter(|title| !title.trim().is_empty()),
        })
    }
}

fn score(field: &str, value: i64) -> Result<u8, String> {
    if (0..=MAX_SCORE).contains(&value) {
        Ok(value as u8)
    } else {
        Err(format!("{field} must be within 0-{MAX_SCORE}, got {value}"))
    }
}

/// The `responseSchema` declared on every analysis call.
pub fn response_schema() -> Value {
    object(
        vec![
            ("matchScore", integer()),
            ("atsScore", integer()),
            ("summary", string()),
            ("skillsFound", array_of(string())),
            ("missingSkills", array_of(string())),
            ("strengths", array_of(string())),
            ("weaknesses", array_of(string())),
            ("keywords", array_of(string())),
            ("jobTitleDetected", string()),
        ],
        &[
            "matchScore",
            "atsScore",
            "summary",
            "skillsFound",
            "missingSkills",
            "strengths",
            "weaknesses",
        ],
    )
}
