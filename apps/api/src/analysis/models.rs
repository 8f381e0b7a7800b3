//! Data model for ATS analysis results.
//!
//! `AnalysisRecord` is immutable once created: the analyzer writes it exactly
//! once, later stages only read it back by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suggestion priority. Serialized lowercase on the wire, matching the
/// schema the backend is prompted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank — high first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// One prioritized, actionable improvement recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u32,
    pub category: String,
    pub priority: Priority,
    pub issue: String,
    pub fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// One of the six fixed scoring dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub category: String,
    pub score: u32,
    pub comment: String,
}

/// Keyword statistics. In targeted mode these are derived from the job
/// description; in general mode from field-typical expectations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub density_pct: u32,
    pub notes: String,
}

/// The validated payload returned by the scoring backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub ats_score: u32,
    pub summary: String,
    pub score_breakdown: Vec<BreakdownEntry>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keyword_analysis: KeywordAnalysis,
    pub suggestions: Vec<Suggestion>,
}

/// The immutable record of one analysis call, as persisted and as returned
/// to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: Uuid,
    pub filename: String,
    pub has_jd: bool,
    pub resume_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: Analysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<Priority>("\"high\"").unwrap(),
            Priority::High
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"medium\"").unwrap(),
            Priority::Medium
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"low\"").unwrap(),
            Priority::Low
        );
    }

    #[test]
    fn test_priority_rejects_unknown_value() {
        let result = serde_json::from_str::<Priority>("\"urgent\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_suggestion_example_is_optional() {
        let json = r#"{
            "id": 1,
            "category": "Keywords",
            "priority": "high",
            "issue": "Missing core keywords",
            "fix": "Add Python and SQL to the Skills section."
        }"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();
        assert!(suggestion.example.is_none());
    }

    #[test]
    fn test_analysis_record_flattens_payload() {
        let record = AnalysisRecord {
            analysis_id: Uuid::new_v4(),
            filename: "resume.pdf".to_string(),
            has_jd: false,
            resume_text: "John Doe".to_string(),
            job_description: None,
            created_at: Utc::now(),
            analysis: Analysis {
                ats_score: 61,
                summary: "Decent resume.".to_string(),
                score_breakdown: vec![],
                strengths: vec![],
                weaknesses: vec![],
                keyword_analysis: KeywordAnalysis {
                    matched: vec![],
                    missing: vec![],
                    density_pct: 40,
                    notes: String::new(),
                },
                suggestions: vec![],
            },
        };
        let value = serde_json::to_value(&record).unwrap();
        // Flattened: ats_score sits at the top level, not under "analysis".
        assert_eq!(value["ats_score"], 61);
        assert!(value.get("analysis").is_none());
        assert!(value.get("job_description").is_none());
    }
}
