//! Prompt builders for the ATS scoring call.
//!
//! Two modes share one output schema: targeted (a job description is
//! present, keywords are matched against it) and general (ATS best-practice
//! heuristics only). The schema block is the contract the validator
//! enforces — keep the two in sync.

/// The six scoring dimensions, in the order the backend must return them.
pub const BREAKDOWN_CATEGORIES: [&str; 6] = [
    "Keywords & Terms",
    "Formatting & Structure",
    "Work Experience",
    "Skills Alignment",
    "Achievements & Impact",
    "Education & Certs",
];

pub const MIN_SUGGESTIONS: usize = 10;
pub const MAX_SUGGESTIONS: usize = 12;

/// System instruction for the analysis call.
pub fn analysis_system(has_jd: bool) -> String {
    let mode = if has_jd {
        "against the provided job description (keyword-targeted mode). \
         Focus heavily on keyword match rate, skill alignment, and how well \
         the candidate's experience maps to the role requirements."
    } else {
        "using general ATS best practices and industry standards. \
         Focus on keyword density, formatting compliance, quantified achievements, \
         action verb quality, and overall ATS readability."
    };

    format!(
        "You are a senior ATS (Applicant Tracking System) specialist with 15+ years \
         of experience as a certified professional resume writer and HR consultant. \
         You have deep knowledge of how ATS systems like Workday, Taleo, Greenhouse, \
         Lever, and iCIMS parse and score resumes. \
         Evaluate the resume {mode} \
         Be thorough, specific, and brutally honest in your assessment. \
         Your feedback should be detailed enough that the candidate knows EXACTLY \
         what to fix and why it matters for ATS scoring. \
         Return ONLY valid JSON — absolutely no markdown fences, no commentary, \
         no explanatory text outside the JSON object."
    )
}

/// User prompt for the analysis call.
pub fn analysis_user_prompt(resume_text: &str, job_description: &str, has_jd: bool) -> String {
    let divider = "=".repeat(50);

    let jd_block = if has_jd {
        format!("JOB DESCRIPTION TO MATCH AGAINST:\n{divider}\n{job_description}\n{divider}\n\n")
    } else {
        String::new()
    };

    let kw_schema = if has_jd {
        r#"  "keyword_analysis": {
    "matched": ["<exact keyword or phrase from the JD that appears in the resume — list all matches>"],
    "missing": ["<important keyword/skill/phrase from the JD completely absent from the resume>"],
    "density_pct": <integer 0-100 representing what % of critical JD keywords appear in the resume>,
    "notes": "<1-2 sentences explaining the keyword match situation and its ATS impact>"
  },"#
    } else {
        r#"  "keyword_analysis": {
    "matched": ["<strong action verbs, technical skills, and industry keywords already present>"],
    "missing": ["<commonly expected keywords for this professional field that are absent>"],
    "density_pct": <integer 0-100 representing keyword richness vs industry standard for this field>,
    "notes": "<1-2 sentences on overall keyword strategy and what areas need improvement>"
  },"#
    };

    let sug_focus = if has_jd {
        "For each suggestion, be very specific about which keywords are missing, \
         which job requirements aren't addressed, and exactly what text to add or change."
    } else {
        "For each suggestion, focus on universal ATS improvements: adding missing keywords, \
         fixing formatting issues, quantifying achievements, and strengthening action verbs."
    };

    format!(
        r#"{jd_block}RESUME TO ANALYZE:
{divider}
{resume_text}
{divider}

Perform a comprehensive ATS analysis and return ONLY this exact JSON structure
(replace all placeholder text with real analysis — be specific and detailed):

{{
  "ats_score": <integer 0-100 — honest score reflecting real ATS pass likelihood. Below 50 = likely rejected. 50-70 = borderline. 70-85 = good chance. 85+ = excellent>,
  "summary": "<3-4 detailed sentences: overall ATS compatibility, biggest strength, most critical weakness, overall recommendation. Mention actual content from the resume.>",
  "score_breakdown": [
    {{"category": "Keywords & Terms", "score": <0-100>, "comment": "<specific observation about keyword usage>"}},
    {{"category": "Formatting & Structure", "score": <0-100>, "comment": "<specific observation about ATS-friendliness of formatting>"}},
    {{"category": "Work Experience", "score": <0-100>, "comment": "<specific observation about how experience is presented>"}},
    {{"category": "Skills Alignment", "score": <0-100>, "comment": "<specific observation about the skills section>"}},
    {{"category": "Achievements & Impact", "score": <0-100>, "comment": "<specific observation about quantified achievements>"}},
    {{"category": "Education & Certs", "score": <0-100>, "comment": "<specific observation about education and certifications>"}}
  ],
  "strengths": ["<strength — specific, referencing actual resume content>", "..."],
  "weaknesses": ["<weakness — specific, explaining the ATS impact>", "..."],
{kw_schema}
  "suggestions": [
    {{
      "id": <integer starting at 1>,
      "category": "<one of: Keywords | Formatting | Experience | Skills | Achievements | Education>",
      "priority": "<high | medium | low>",
      "issue": "<concise problem title — max 8 words>",
      "fix": "<detailed, actionable fix in 2-3 sentences. Be SPECIFIC — tell them exactly what to write, add, or change.>",
      "example": "<concrete before → after example using actual text from the resume>"
    }}
  ]
}}

CRITICAL RULES:
1. ats_score must be brutally honest — most resumes score 40-70, reserve 80+ for truly optimized resumes.
2. Provide EXACTLY 10-12 suggestions. Sort them: all HIGH priority first, then MEDIUM, then LOW.
3. Every suggestion must reference SPECIFIC content from this resume — no generic advice.
4. The "example" field must show a real before/after using actual text from the resume.
5. {sug_focus}
6. Score each category independently and honestly — not every category needs to be high."#
    )
}

/// Corrective re-prompt sent after a schema validation failure. Carries the
/// exact violations so the backend can fix its previous output.
pub fn corrective_prompt(original_prompt: &str, violations: &[String]) -> String {
    format!(
        "{original_prompt}\n\n\
         YOUR PREVIOUS RESPONSE WAS REJECTED. It violated the required schema:\n\
         {}\n\n\
         Return the complete corrected JSON object. Fix every violation listed above. \
         Do not change the schema, do not add commentary.",
        violations
            .iter()
            .map(|v| format!("- {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
}
