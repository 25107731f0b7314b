//! Submission response payloads with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::{QuestionOutcome, ScoringResult};

/// The payload returned to a learner after a quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub success: bool,
    /// Score percentage, rounded to two decimals for display.
    pub score: f64,
    pub passed: bool,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub passing_score: u32,
    /// Per-question breakdown, in question order.
    pub questions: Vec<QuestionOutcome>,
    /// Human-readable result line.
    pub message: String,
}

impl SubmissionReport {
    /// Build the response payload for a graded submission.
    pub fn from_result(result: &ScoringResult, passing_score: u32) -> Self {
        Self {
            success: true,
            score: (result.score_percentage * 100.0).round() / 100.0,
            passed: result.passed,
            correct_answers: result.correct_count,
            total_questions: result.total_count,
            passing_score,
            questions: result.per_question.clone(),
            message: result_message(result, passing_score),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SubmissionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Format the result line shown after a submission.
fn result_message(result: &ScoringResult, passing_score: u32) -> String {
    let summary = format!(
        "You scored {} out of {} ({:.0}%). ",
        result.correct_count, result.total_count, result.score_percentage
    );
    if result.passed {
        format!("{summary}Congratulations, you passed! You needed {passing_score}% to pass.")
    } else {
        format!("{summary}You needed {passing_score}% to pass.")
    }
}
