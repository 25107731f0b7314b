//! Attempt records and attempt gating.
//!
//! The canonical attempt store lives behind the web layer; these are the
//! shapes it persists and the pure decisions made over them. Keeping the
//! upsert idempotent per (learner, task) key is the storage layer's
//! responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::AnswerMap;
use crate::scoring::ScoringResult;

/// Identifies where an attempt belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptKey {
    pub student_id: String,
    pub course_id: String,
    pub module_id: String,
    pub task_id: String,
}

/// One learner's attempt at a quiz task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Unique attempt identifier.
    pub id: Uuid,
    pub student_id: String,
    pub course_id: String,
    pub module_id: String,
    pub task_id: String,
    /// Score percentage at grading time (0 until graded).
    pub score: f64,
    pub passed: bool,
    /// Raw submitted answers, as received.
    pub answers: AnswerMap,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub created_at: DateTime<Utc>,
    /// Set once the attempt is submitted and graded; ungraded attempts
    /// are resumable.
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// The empty in-progress row created when a learner opens a quiz.
    pub fn started(key: AttemptKey, total_questions: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id: key.student_id,
            course_id: key.course_id,
            module_id: key.module_id,
            task_id: key.task_id,
            score: 0.0,
            passed: false,
            answers: AnswerMap::new(),
            total_questions,
            correct_answers: 0,
            created_at: now,
            completed_at: None,
            updated_at: now,
        }
    }

    /// The graded record to persist for a submission.
    pub fn from_result(key: AttemptKey, answers: AnswerMap, result: &ScoringResult) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id: key.student_id,
            course_id: key.course_id,
            module_id: key.module_id,
            task_id: key.task_id,
            score: result.score_percentage,
            passed: result.passed,
            answers,
            total_questions: result.total_count,
            correct_answers: result.correct_count,
            created_at: now,
            completed_at: Some(now),
            updated_at: now,
        }
    }
}

/// Decision for a learner asking to take a quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptGate<'a> {
    /// Pick up the earliest ungraded attempt.
    Resume(&'a AttemptRecord),
    /// Every prior attempt is graded and the cap is not reached.
    StartNew,
}

/// Gate a quiz sitting on the learner's attempt history. The cap applies
/// to attempts in any state, so a learner cannot sidestep it by leaving
/// attempts ungraded.
pub fn check_attempt_allowed(
    attempts: &[AttemptRecord],
    max_attempts: u32,
) -> Result<AttemptGate<'_>, QuizError> {
    if attempts.len() >= max_attempts as usize {
        return Err(QuizError::MaxAttemptsReached { max_attempts });
    }

    Ok(attempts
        .iter()
        .find(|a| a.completed_at.is_none())
        .map(AttemptGate::Resume)
        .unwrap_or(AttemptGate::StartNew))
}

/// The attempt with the highest score, if any.
pub fn best_attempt(attempts: &[AttemptRecord]) -> Option<&AttemptRecord> {
    attempts.iter().max_by(|a, b| a.score.total_cmp(&b.score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> AttemptKey {
        AttemptKey {
            student_id: "s1".into(),
            course_id: "c1".into(),
            module_id: "m1".into(),
            task_id: "t1".into(),
        }
    }

    fn graded(score: f64) -> AttemptRecord {
        let result = ScoringResult {
            score_percentage: score,
            correct_count: 0,
            total_count: 0,
            passed: score >= 70.0,
            per_question: vec![],
        };
        AttemptRecord::from_result(key(), AnswerMap::new(), &result)
    }

    #[test]
    fn started_attempt_is_resumable() {
        let attempt = AttemptRecord::started(key(), 5);
        assert_eq!(attempt.score, 0.0);
        assert!(!attempt.passed);
        assert_eq!(attempt.total_questions, 5);
        assert!(attempt.completed_at.is_none());
    }

    #[test]
    fn graded_attempt_is_finished() {
        let result = ScoringResult {
            score_percentage: 80.0,
            correct_count: 4,
            total_count: 5,
            passed: true,
            per_question: vec![],
        };
        let answers: AnswerMap = [("1".to_string(), "A".to_string())].into_iter().collect();
        let attempt = AttemptRecord::from_result(key(), answers, &result);
        assert_eq!(attempt.score, 80.0);
        assert!(attempt.passed);
        assert_eq!(attempt.correct_answers, 4);
        assert_eq!(attempt.total_questions, 5);
        assert!(attempt.completed_at.is_some());
        assert_eq!(attempt.answers.get("1"), Some(&"A".to_string()));
    }

    #[test]
    fn gate_refuses_at_max_attempts() {
        let attempts = vec![graded(50.0), graded(60.0), graded(65.0)];
        let err = check_attempt_allowed(&attempts, 3).unwrap_err();
        assert!(matches!(
            err,
            QuizError::MaxAttemptsReached { max_attempts: 3 }
        ));
    }

    #[test]
    fn gate_refuses_even_with_ungraded_attempt() {
        let attempts = vec![graded(50.0), AttemptRecord::started(key(), 5)];
        assert!(check_attempt_allowed(&attempts, 2).is_err());
    }

    #[test]
    fn gate_resumes_earliest_ungraded() {
        let first_open = AttemptRecord::started(key(), 5);
        let second_open = AttemptRecord::started(key(), 5);
        let attempts = vec![graded(50.0), first_open.clone(), second_open];

        match check_attempt_allowed(&attempts, 5).unwrap() {
            AttemptGate::Resume(attempt) => assert_eq!(attempt.id, first_open.id),
            AttemptGate::StartNew => panic!("expected to resume"),
        }
    }

    #[test]
    fn gate_starts_new_when_all_graded() {
        let attempts = vec![graded(50.0)];
        assert!(matches!(
            check_attempt_allowed(&attempts, 3).unwrap(),
            AttemptGate::StartNew
        ));
        assert!(matches!(
            check_attempt_allowed(&[], 3).unwrap(),
            AttemptGate::StartNew
        ));
    }

    #[test]
    fn best_attempt_by_score() {
        let attempts = vec![graded(50.0), graded(90.0), graded(70.0)];
        assert_eq!(best_attempt(&attempts).unwrap().score, 90.0);
        assert!(best_attempt(&[]).is_none());
    }
}
