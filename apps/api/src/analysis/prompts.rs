// Prompt constants for résumé analysis.

/// Used in place of a blank job description.
pub const DEFAULT_JOB_DESCRIPTION: &str = "General tech industry role";

/// Analysis prompt template. Replace `{job_description}` before sending.
/// The résumé itself travels as an inline document part next to this text.
pub const ANALYZE_PROMPT_TEMPLATE: &str = "\
You are an expert ATS (Applicant Tracking System) and technical recruiter.
Analyze the provided resume against the following Job Description.

Job Description:
{job_description}

Return a JSON object containing:
- matchScore (0-100 integer)
- atsScore (0-100 integer based on formatting and keyword density)
- summary (Short professional summary of the candidate)
- skillsFound (List of technical and soft skills found in resume)
- missingSkills (List of skills required by JD but missing in resume)
- strengths (List of strong points)
- weaknesses (List of gaps or weak points)
- keywords (Top keywords detected)
- jobTitleDetected (The likely job title of the candidate)

Strictly adhere to the JSON schema.";

pub fn build_analyze_prompt(job_description: &str) -> String {
    let job_description = match job_description.trim() {
        "" => DEFAULT_JOB_DESCRIPTION,
        jd => jd,
    };
    ANALYZE_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
