//! Boundary validation for backend analysis output.
//!
//! The backend's JSON is dynamically shaped; nothing passes this boundary
//! unvalidated. Out-of-range values are strictly rejected — never clamped —
//! so a violation either gets fixed by the single corrective re-prompt or
//! fails the analysis.

use std::collections::HashSet;

use crate::analysis::models::{Analysis, Suggestion};
use crate::analysis::prompts::{BREAKDOWN_CATEGORIES, MAX_SUGGESTIONS, MIN_SUGGESTIONS};

/// Checks a parsed analysis against the schema contract.
/// Returns the full list of violations (empty = valid) so a corrective
/// re-prompt can name every problem at once.
pub fn validate_analysis(analysis: &Analysis, has_jd: bool) -> Vec<String> {
    let mut violations = Vec::new();

    if analysis.ats_score > 100 {
        violations.push(format!(
            "ats_score must be within 0-100, got {}",
            analysis.ats_score
        ));
    }

    if analysis.summary.trim().is_empty() {
        violations.push("summary must not be empty".to_string());
    }

    if analysis.score_breakdown.len() != BREAKDOWN_CATEGORIES.len() {
        violations.push(format!(
            "score_breakdown must contain exactly {} entries, got {}",
            BREAKDOWN_CATEGORIES.len(),
            analysis.score_breakdown.len()
        ));
    } else {
        for (entry, expected) in analysis.score_breakdown.iter().zip(BREAKDOWN_CATEGORIES) {
            if !entry.category.trim().eq_ignore_ascii_case(expected) {
                violations.push(format!(
                    "score_breakdown category '{}' does not match expected '{}'",
                    entry.category, expected
                ));
            }
            if entry.score > 100 {
                violations.push(format!(
                    "score for '{}' must be within 0-100, got {}",
                    entry.category, entry.score
                ));
            }
        }
    }

    if analysis.strengths.is_empty() {
        violations.push("strengths must not be empty".to_string());
    }
    if analysis.weaknesses.is_empty() {
        violations.push("weaknesses must not be empty".to_string());
    }

    if analysis.keyword_analysis.density_pct > 100 {
        violations.push(format!(
            "keyword_analysis.density_pct must be within 0-100, got {}",
            analysis.keyword_analysis.density_pct
        ));
    }

    if has_jd {
        let matched: HashSet<String> = analysis
            .keyword_analysis
            .matched
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect();
        let overlap: Vec<&String> = analysis
            .keyword_analysis
            .missing
            .iter()
            .filter(|k| matched.contains(&k.trim().to_lowercase()))
            .collect();
        if !overlap.is_empty() {
            violations.push(format!(
                "matched and missing keyword sets must be disjoint; overlap: {overlap:?}"
            ));
        }
    }

    let count = analysis.suggestions.len();
    if !(MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&count) {
        violations.push(format!(
            "suggestions must contain {MIN_SUGGESTIONS}-{MAX_SUGGESTIONS} items, got {count}"
        ));
    }

    for suggestion in &analysis.suggestions {
        if suggestion.issue.trim().is_empty() || suggestion.fix.trim().is_empty() {
            violations.push(format!(
                "suggestion {} must have a non-empty issue and fix",
                suggestion.id
            ));
        }
    }

    violations
}

/// Enforces the suggestion ordering invariant: priority descending, original
/// order preserved within a priority band. Applied after validation — the
/// order is an invariant of the record, not a reason to reject.
pub fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| s.priority.rank());
}
