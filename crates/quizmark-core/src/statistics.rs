//! Learner-facing aggregate statistics.
//!
//! Everything here is recomputed from attempt records and task counts on
//! each request; the dashboard never reads a cached figure.

use serde::{Deserialize, Serialize};

use crate::attempt::{best_attempt, AttemptRecord};
use crate::progress::{combine, ProgressSummary};

/// Mean score across attempts, 0 when there are none. Unrounded;
/// presentation rounds.
pub fn average_score(attempts: &[AttemptRecord]) -> f64 {
    if attempts.is_empty() {
        return 0.0;
    }
    attempts.iter().map(|a| a.score).sum::<f64>() / attempts.len() as f64
}

/// Task completion counts for one enrolled course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub course_id: String,
    /// Lowest-level (completed, total) task counts for the course.
    pub tasks: ProgressSummary,
}

/// The numbers on a learner's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerOverview {
    pub enrolled_courses: usize,
    pub completed_courses: usize,
    /// Mean score over every quiz attempt.
    pub average_score: f64,
    /// Overall completion, re-aggregated from per-course task counts.
    pub completion: ProgressSummary,
}

/// Compute a learner's dashboard numbers from their enrolled courses and
/// full attempt history.
pub fn learner_overview(
    courses: &[CourseProgress],
    attempts: &[AttemptRecord],
) -> LearnerOverview {
    LearnerOverview {
        enrolled_courses: courses.len(),
        completed_courses: courses.iter().filter(|c| c.tasks.is_complete()).count(),
        average_score: average_score(attempts),
        completion: combine(courses.iter().map(|c| c.tasks)),
    }
}

/// Per-course statistics for progress views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub course_id: String,
    pub progress: ProgressSummary,
    /// Mean quiz score in this course, 0 when no attempts.
    pub average_quiz_score: f64,
    /// Highest quiz score in this course, 0 when no attempts.
    pub best_score: f64,
}

/// Compute one course's statistics from its rolled-up progress and the
/// learner's attempts within that course (pre-filtered by the caller).
pub fn course_stats(
    course_id: String,
    progress: ProgressSummary,
    attempts: &[AttemptRecord],
) -> CourseStats {
    CourseStats {
        course_id,
        progress,
        average_quiz_score: average_score(attempts),
        best_score: best_attempt(attempts).map(|a| a.score).unwrap_or(0.0),
    }
}
