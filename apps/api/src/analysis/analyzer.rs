//! Score Analyzer — one structured backend call under an explicit
//! output-schema contract, with a single corrective re-prompt on schema
//! failure.
//!
//! Flow: build prompts (general or targeted) → backend call → parse →
//! validate → on violation, one corrective call → validate → else fail.

use tracing::{info, warn};

use crate::analysis::models::Analysis;
use crate::analysis::prompts::{analysis_system, analysis_user_prompt, corrective_prompt};
use crate::analysis::validation::{sort_suggestions, validate_analysis};
use crate::errors::AppError;
use crate::llm_client::{extract_json_object, strip_json_fences, ChatBackend, ChatRequest};

const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Runs the scoring call and returns a validated `Analysis`.
///
/// `job_description` empty = general mode; non-empty = targeted mode. The
/// backend's content is non-deterministic — only the structure is enforced
/// here, strictly, with exactly one corrective retry before `Analysis`
/// failure.
pub async fn run_analysis(
    llm: &dyn ChatBackend,
    resume_text: &str,
    job_description: &str,
) -> Result<Analysis, AppError> {
    let has_jd = !job_description.trim().is_empty();
    let system = analysis_system(has_jd);
    let user = analysis_user_prompt(resume_text, job_description, has_jd);

    let request = ChatRequest {
        system: system.clone(),
        user: user.clone(),
        temperature: ANALYSIS_TEMPERATURE,
        json_mode: true,
    };

    let raw = llm.complete(&request).await?;

    match parse_and_validate(&raw, has_jd) {
        Ok(analysis) => Ok(finalize(analysis)),
        Err(violations) => {
            warn!(
                "Analysis response failed validation ({} violations), issuing corrective re-prompt",
                violations.len()
            );

            let corrective = ChatRequest {
                system,
                user: corrective_prompt(&user, &violations),
                temperature: ANALYSIS_TEMPERATURE,
                json_mode: true,
            };
            let raw = llm.complete(&corrective).await?;

            match parse_and_validate(&raw, has_jd) {
                Ok(analysis) => {
                    info!("Corrective re-prompt produced a valid analysis");
                    Ok(finalize(analysis))
                }
                Err(violations) => Err(AppError::Analysis(format!(
                    "Backend output failed schema validation after corrective retry: {}",
                    violations.join("; ")
                ))),
            }
        }
    }
}

/// Parses raw backend text into an `Analysis` and checks the schema contract.
/// Returns the violation list on any failure so the corrective prompt can
/// name every problem.
fn parse_and_validate(raw: &str, has_jd: bool) -> Result<Analysis, Vec<String>> {
    let text = strip_json_fences(raw);

    let analysis: Analysis = serde_json::from_str(text).or_else(|first_err| {
        // Salvage pass for output with commentary around the JSON object.
        extract_json_object(text)
            .and_then(|candidate| serde_json::from_str(candidate).ok())
            .ok_or_else(|| vec![format!("response was not valid schema JSON: {first_err}")])
    })?;

    let violations = validate_analysis(&analysis, has_jd);
    if violations.is_empty() {
        Ok(analysis)
    } else {
        Err(violations)
    }
}

/// Applies record invariants that are enforced rather than rejected:
/// suggestions ordered by priority descending, original order within a band.
fn finalize(mut analysis: Analysis) -> Analysis {
    sort_suggestions(&mut analysis.suggestions);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{BreakdownEntry, KeywordAnalysis, Priority, Suggestion};
    use crate::analysis::prompts::BREAKDOWN_CATEGORIES;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted backend: pops canned responses in order and records the
    /// requests it receives.
    struct ScriptedBackend {
        responses: Mutex<Vec<String>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<String>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(LlmError::EmptyContent);
            }
            Ok(responses.remove(0))
        }
    }

    fn analysis_with_suggestions(suggestions: Vec<Suggestion>) -> Analysis {
        Analysis {
            ats_score: 58,
            summary: "Readable resume, light on metrics.".to_string(),
            score_breakdown: BREAKDOWN_CATEGORIES
                .iter()
                .map(|c| BreakdownEntry {
                    category: c.to_string(),
                    score: 55,
                    comment: "Observation.".to_string(),
                })
                .collect(),
            strengths: vec!["Standard section order".to_string()],
            weaknesses: vec!["Weak action verbs".to_string()],
            keyword_analysis: KeywordAnalysis {
                matched: vec!["Python".to_string()],
                missing: vec!["Docker".to_string()],
                density_pct: 40,
                notes: "Partial coverage.".to_string(),
            },
            suggestions,
        }
    }

    fn suggestion(id: u32, priority: Priority) -> Suggestion {
        Suggestion {
            id,
            category: "Keywords".to_string(),
            priority,
            issue: format!("Issue {id}"),
            fix: format!("Fix {id}"),
            example: None,
        }
    }

    fn valid_json() -> String {
        let mut suggestions: Vec<Suggestion> = (1..=5)
            .map(|i| suggestion(i, Priority::Low))
            .chain((6..=10).map(|i| suggestion(i, Priority::High)))
            .collect();
        suggestions.push(suggestion(11, Priority::Medium));
        serde_json::to_string(&analysis_with_suggestions(suggestions)).unwrap()
    }

    fn invalid_json_too_few_suggestions() -> String {
        let suggestions = (1..=4).map(|i| suggestion(i, Priority::High)).collect();
        serde_json::to_string(&analysis_with_suggestions(suggestions)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_first_response_needs_one_call() {
        let backend = ScriptedBackend::new(vec![valid_json()]);
        let analysis = run_analysis(&backend, "John Doe\nEngineer", "").await.unwrap();
        assert_eq!(backend.request_count(), 1);
        assert_eq!(analysis.score_breakdown.len(), 6);
        assert_eq!(analysis.suggestions.len(), 11);
    }

    #[tokio::test]
    async fn test_suggestions_are_sorted_by_priority_descending() {
        let backend = ScriptedBackend::new(vec![valid_json()]);
        let analysis = run_analysis(&backend, "resume", "").await.unwrap();
        let ranks: Vec<u8> = analysis
            .suggestions
            .iter()
            .map(|s| s.priority.rank())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        // Stable: the high-priority ids keep their original relative order.
        let high_ids: Vec<u32> = analysis
            .suggestions
            .iter()
            .filter(|s| s.priority == Priority::High)
            .map(|s| s.id)
            .collect();
        assert_eq!(high_ids, vec![6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_schema_failure_triggers_one_corrective_retry() {
        let backend =
            ScriptedBackend::new(vec![invalid_json_too_few_suggestions(), valid_json()]);
        let analysis = run_analysis(&backend, "resume", "").await.unwrap();
        assert_eq!(backend.request_count(), 2);
        assert_eq!(analysis.suggestions.len(), 11);

        let requests = backend.requests.lock().unwrap();
        assert!(requests[1].user.contains("REJECTED"));
        assert!(requests[1].user.contains("got 4"));
    }

    #[tokio::test]
    async fn test_two_schema_failures_fail_the_analysis() {
        let backend = ScriptedBackend::new(vec![
            invalid_json_too_few_suggestions(),
            invalid_json_too_few_suggestions(),
        ]);
        let result = run_analysis(&backend, "resume", "").await;
        assert_eq!(backend.request_count(), 2);
        assert!(matches!(result, Err(AppError::Analysis(_))));
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted() {
        let fenced = format!("```json\n{}\n```", valid_json());
        let backend = ScriptedBackend::new(vec![fenced]);
        let analysis = run_analysis(&backend, "resume", "").await.unwrap();
        assert_eq!(analysis.ats_score, 58);
    }

    #[tokio::test]
    async fn test_json_with_surrounding_prose_is_salvaged() {
        let wrapped = format!("Here is your analysis:\n{}\nGood luck!", valid_json());
        let backend = ScriptedBackend::new(vec![wrapped]);
        let analysis = run_analysis(&backend, "resume", "").await.unwrap();
        assert_eq!(analysis.ats_score, 58);
    }

    #[tokio::test]
    async fn test_general_mode_uses_general_prompt() {
        let backend = ScriptedBackend::new(vec![valid_json()]);
        run_analysis(&backend, "John Doe\nSoftware Engineer\n5 years Python", "")
            .await
            .unwrap();
        let requests = backend.requests.lock().unwrap();
        assert!(!requests[0].user.contains("JOB DESCRIPTION TO MATCH AGAINST"));
        assert!(requests[0].system.contains("general ATS best practices"));
        assert!(requests[0].json_mode);
    }

    #[tokio::test]
    async fn test_targeted_mode_embeds_jd_in_prompt() {
        let backend = ScriptedBackend::new(vec![valid_json()]);
        run_analysis(&backend, "resume", "Senior Rust Engineer, Kubernetes")
            .await
            .unwrap();
        let requests = backend.requests.lock().unwrap();
        assert!(requests[0].user.contains("Senior Rust Engineer, Kubernetes"));
        assert!(requests[0].system.contains("keyword-targeted mode"));
    }

    #[tokio::test]
    async fn test_unparseable_twice_is_analysis_failure() {
        let backend = ScriptedBackend::new(vec![
            "I cannot analyze this resume.".to_string(),
            "Still not JSON.".to_string(),
        ]);
        let result = run_analysis(&backend, "resume", "").await;
        assert!(matches!(result, Err(AppError::Analysis(_))));
    }
}
