//! Progress aggregation.
//!
//! Completion summaries are computed fresh from (completed, total) counts
//! on every request; nothing here is cached or persisted. Higher-level
//! rollups always re-aggregate from the lowest-level counts, so module,
//! course, and dashboard figures cannot drift apart under rounding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scoring::ScoringResult;

/// Completion state of one (learner, task) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "not_started"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(TaskStatus::NotStarted),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// Completion summary over a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Items completed.
    pub completed: usize,
    /// Items in scope.
    pub total: usize,
    /// Percentage in [0, 100]. Unrounded; see [`ProgressSummary::rounded_percentage`].
    pub percentage: f64,
}

impl ProgressSummary {
    /// Percentage rounded to one decimal place, for display.
    pub fn rounded_percentage(&self) -> f64 {
        (self.percentage * 10.0).round() / 10.0
    }

    /// Whether every item in scope is complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// Compute the completion summary for `completed_items` out of `total_items`.
pub fn aggregate(total_items: usize, completed_items: usize) -> ProgressSummary {
    let percentage = if total_items == 0 {
        0.0
    } else {
        completed_items as f64 / total_items as f64 * 100.0
    };

    ProgressSummary {
        completed: completed_items,
        total: total_items,
        percentage,
    }
}

/// Roll up lower-level summaries by summing their counts.
///
/// Course and dashboard figures must come through here (or through
/// [`aggregate`] over raw counts), never by averaging percentages.
pub fn combine<I>(summaries: I) -> ProgressSummary
where
    I: IntoIterator<Item = ProgressSummary>,
{
    let mut completed = 0;
    let mut total = 0;
    for summary in summaries {
        completed += summary.completed;
        total += summary.total;
    }
    aggregate(total, completed)
}

/// The progress-record update a caller should persist after grading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// New status for the (learner, task) progress record.
    pub status: TaskStatus,
    /// Completion percentage to store; for quizzes this is the score.
    pub completion_percentage: f64,
}

/// Derive the task progress update from a grading result: a passed
/// attempt completes the task, a failed one leaves it in progress with
/// the score as its completion percentage.
pub fn derive_task_update(result: &ScoringResult) -> ProgressUpdate {
    ProgressUpdate {
        status: if result.passed {
            TaskStatus::Completed
        } else {
            TaskStatus::InProgress
        },
        completion_percentage: result.score_percentage,
    }
}

/// Status of a module or course given its rolled-up summary. `started`
/// is whether any progress record exists for the learner in this scope.
pub fn summary_status(summary: &ProgressSummary, started: bool) -> TaskStatus {
    if summary.percentage >= 100.0 {
        TaskStatus::Completed
    } else if started {
        TaskStatus::InProgress
    } else {
        TaskStatus::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_basic_cases() {
        assert_eq!(aggregate(0, 0).percentage, 0.0);
        assert_eq!(aggregate(10, 5).percentage, 50.0);
        assert_eq!(aggregate(3, 3).percentage, 100.0);
    }

    #[test]
    fn combine_sums_counts_instead_of_averaging() {
        let rolled = combine([aggregate(2, 1), aggregate(3, 3)]);
        assert_eq!(rolled.completed, 4);
        assert_eq!(rolled.total, 5);
        assert_eq!(rolled.percentage, 80.0);

        // Averaging the two percentages would give 75%, not 80%.
        let averaged = (aggregate(2, 1).percentage + aggregate(3, 3).percentage) / 2.0;
        assert_ne!(rolled.percentage, averaged);
    }

    #[test]
    fn combine_of_nothing_is_empty() {
        let rolled = combine([]);
        assert_eq!(rolled.total, 0);
        assert_eq!(rolled.percentage, 0.0);
        assert!(!rolled.is_complete());
    }

    #[test]
    fn rounded_percentage_one_decimal() {
        assert_eq!(aggregate(3, 2).rounded_percentage(), 66.7);
        assert_eq!(aggregate(3, 1).rounded_percentage(), 33.3);
        assert_eq!(aggregate(4, 1).rounded_percentage(), 25.0);
    }

    #[test]
    fn derive_update_from_grading() {
        let passed = ScoringResult {
            score_percentage: 80.0,
            correct_count: 4,
            total_count: 5,
            passed: true,
            per_question: vec![],
        };
        let update = derive_task_update(&passed);
        assert_eq!(update.status, TaskStatus::Completed);
        assert_eq!(update.completion_percentage, 80.0);

        let failed = ScoringResult {
            passed: false,
            score_percentage: 40.0,
            correct_count: 2,
            ..passed
        };
        let update = derive_task_update(&failed);
        assert_eq!(update.status, TaskStatus::InProgress);
        assert_eq!(update.completion_percentage, 40.0);
    }

    #[test]
    fn summary_status_levels() {
        assert_eq!(
            summary_status(&aggregate(4, 4), true),
            TaskStatus::Completed
        );
        assert_eq!(
            summary_status(&aggregate(4, 2), true),
            TaskStatus::InProgress
        );
        assert_eq!(
            summary_status(&aggregate(4, 0), false),
            TaskStatus::NotStarted
        );
    }

    #[test]
    fn task_status_display_and_parse() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            "completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert!("finished".parse::<TaskStatus>().is_err());
    }
}
