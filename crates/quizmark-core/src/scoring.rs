//! Quiz scoring.
//!
//! Scoring is a pure function of the question set and the submitted
//! answers. Persisting the outcome (attempt and progress records) is the
//! caller's job; see [`crate::attempt`] and [`crate::progress`].

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, QuestionDefinition, QuizSource, StoredQuestion};

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// Question text.
    pub question: String,
    /// The learner's answer as submitted (empty if absent).
    pub submitted_answer: String,
    /// The answer that was expected.
    pub correct_answer: String,
    /// Whether the submission matched.
    pub is_correct: bool,
}

/// Result of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Score in [0, 100]. Unrounded; rounding is a presentation concern.
    pub score_percentage: f64,
    /// Number of correctly answered questions.
    pub correct_count: usize,
    /// Number of questions in the quiz.
    pub total_count: usize,
    /// Whether the score met the passing threshold.
    pub passed: bool,
    /// Per-question breakdown, in question order.
    pub per_question: Vec<QuestionOutcome>,
}

/// Grade a submission against a quiz, using the comparison rule its
/// representation calls for.
pub fn score(source: &QuizSource, answers: &AnswerMap, passing_score: u32) -> ScoringResult {
    match source {
        QuizSource::Text(questions) => score_parsed(questions, answers, passing_score),
        QuizSource::Table(questions) => score_stored(questions, answers, passing_score),
    }
}

/// Grade a text-defined quiz.
///
/// Answers are keyed by 1-based question position; a missing key grades
/// as an empty submission. Comparison is case-insensitive on the trimmed
/// submission against the trimmed correct option, so a letter answer
/// like "b" matches a correct option "B".
pub fn score_parsed(
    questions: &[QuestionDefinition],
    answers: &AnswerMap,
    passing_score: u32,
) -> ScoringResult {
    let mut correct_count = 0;
    let mut per_question = Vec::with_capacity(questions.len());

    for (idx, question) in questions.iter().enumerate() {
        let key = (idx + 1).to_string();
        let submitted = answers
            .get(&key)
            .map(|a| a.trim().to_string())
            .unwrap_or_default();
        let correct_answer = question.correct_option.trim().to_uppercase();
        let is_correct = submitted.to_uppercase() == correct_answer;

        if is_correct {
            correct_count += 1;
        }
        per_question.push(QuestionOutcome {
            question: question.text.clone(),
            submitted_answer: submitted,
            correct_answer,
            is_correct,
        });
    }

    finish(correct_count, questions.len(), passing_score, per_question)
}

/// Grade a table-defined quiz.
///
/// Answers are keyed by question row id and must be present AND exactly
/// equal to the stored `correct_answer`; the persisted correct answers
/// are full option strings, so no trimming or case folding is applied.
pub fn score_stored(
    questions: &[StoredQuestion],
    answers: &AnswerMap,
    passing_score: u32,
) -> ScoringResult {
    let mut correct_count = 0;
    let mut per_question = Vec::with_capacity(questions.len());

    for question in questions {
        let submitted = answers.get(&question.id);
        let is_correct = submitted.is_some_and(|a| a == &question.correct_answer);

        if is_correct {
            correct_count += 1;
        }
        per_question.push(QuestionOutcome {
            question: question.text.clone(),
            submitted_answer: submitted.cloned().unwrap_or_default(),
            correct_answer: question.correct_answer.clone(),
            is_correct,
        });
    }

    finish(correct_count, questions.len(), passing_score, per_question)
}

fn finish(
    correct_count: usize,
    total_count: usize,
    passing_score: u32,
    per_question: Vec<QuestionOutcome>,
) -> ScoringResult {
    let score_percentage = if total_count == 0 {
        0.0
    } else {
        correct_count as f64 / total_count as f64 * 100.0
    };

    ScoringResult {
        score_percentage,
        correct_count,
        total_count,
        passed: score_percentage >= passing_score as f64,
        per_question,
    }
}
