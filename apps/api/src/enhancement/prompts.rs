//! Prompt builders for the rewrite call.
//!
//! The "apply only the selected suggestions" rule is an instruction-level
//! contract with the backend — it cannot be mechanically verified, which is
//! why the handler returns the original text and the applied list alongside
//! the rewrite for review.

use crate::analysis::models::Suggestion;

/// System instruction for the rewrite call.
pub const ENHANCEMENT_SYSTEM: &str = "You are an elite professional resume writer and ATS \
optimization expert with 15+ years of experience helping candidates land interviews at top \
companies. Your task is to rewrite the provided resume, applying ONLY the listed improvements \
while following these strict rules:\n\n\
PRESERVATION RULES (never violate these):\n\
- Keep ALL factual information exactly as-is: dates, company names, job titles, universities, \
degrees, GPA, certifications, personal name, contact info\n\
- Never invent or fabricate any experience, skills, or achievements\n\
- Never remove any jobs, projects, or educational entries\n\
- Preserve the resume's paragraph and section boundaries — do not merge, split, or reorder \
sections, and do not restructure the document\n\
- Apply ONLY the improvements listed below — make no unrelated changes\n\n\
OUTPUT FORMAT:\n\
Return ONLY the improved resume as clean plain text, keeping the original line structure. \
No preamble, no commentary, no markdown, no JSON — just the resume text.";

/// Builds the user prompt: original text, optional target JD, and the
/// numbered improvement list.
pub fn enhancement_user_prompt(
    resume_text: &str,
    job_description: &str,
    suggestions: &[Suggestion],
) -> String {
    let divider = "=".repeat(60);

    let jd_block = if job_description.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\nTARGET JOB DESCRIPTION (optimize the resume for this role):\n\
             {divider}\n{job_description}\n{divider}\n"
        )
    };

    format!(
        "ORIGINAL RESUME:\n{divider}\n{resume_text}\n{divider}{jd_block}\n\n\
         APPLY ALL OF THESE IMPROVEMENTS (and nothing else):\n{divider}\n{}\n{divider}\n\n\
         Now rewrite the complete resume applying every improvement above and no others. \
         The result should be stronger than the original — more impactful language and better \
         keyword density — with every fact and every section boundary preserved.",
        format_improvements(suggestions)
    )
}

/// Formats the selected suggestions as numbered improvement instructions.
pub fn format_improvements(suggestions: &[Suggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut block = format!(
                "IMPROVEMENT {} [{} — {} PRIORITY]\nProblem: {}\nHow to fix: {}",
                i + 1,
                s.category,
                format!("{:?}", s.priority).to_uppercase(),
                s.issue,
                s.fix
            );
            if let Some(example) = &s.example {
                block.push_str(&format!("\nExample: {example}"));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
