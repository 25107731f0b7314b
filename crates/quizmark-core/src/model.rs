//! Core data model types for quizmark.
//!
//! These are the fundamental types the rest of the system uses to
//! represent quizzes, questions, and learner submissions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A learner's submitted answers, keyed by question identifier.
///
/// Text-defined quizzes key answers by 1-based question position
/// ("1", "2", ...); table-defined quizzes key them by question row id.
pub type AnswerMap = HashMap<String, String>;

/// One question parsed from a free-text quiz definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Full question line, including its number prefix (e.g. "1. What is ...?").
    pub text: String,
    /// Option display texts, in the order they appeared.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct option's text. Empty when the question has no options;
    /// otherwise always equal to one of `options`.
    #[serde(default)]
    pub correct_option: String,
}

impl QuestionDefinition {
    /// Letter of the correct option ('A' for the first option, and so on).
    pub fn correct_letter(&self) -> Option<char> {
        self.options
            .iter()
            .position(|o| o == &self.correct_option)
            .map(|idx| (b'A' + idx as u8) as char)
    }
}

/// A question row from a question table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
    /// Row identifier, used as the answer key.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Option display texts.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer, stored as a full option string.
    pub correct_answer: String,
}

/// Where a quiz's questions come from.
///
/// The two representations carry different grading rules: text-defined
/// quizzes are position-keyed and compared case-insensitively,
/// table-defined quizzes are id-keyed and compared exactly. See
/// [`crate::scoring`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "questions", rename_all = "lowercase")]
pub enum QuizSource {
    /// Questions parsed out of a free-text definition blob.
    Text(Vec<QuestionDefinition>),
    /// Questions fetched from a question table.
    Table(Vec<StoredQuestion>),
}

impl QuizSource {
    /// Number of questions in the quiz.
    pub fn question_count(&self) -> usize {
        match self {
            QuizSource::Text(questions) => questions.len(),
            QuizSource::Table(questions) => questions.len(),
        }
    }

    /// Returns `true` if the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.question_count() == 0
    }
}

/// Per-quiz grading and delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Minimum score percentage required to pass.
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,
    /// Maximum number of attempts per learner.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Time limit in minutes (0 = unlimited).
    #[serde(default)]
    pub time_limit_minutes: u32,
    /// Order questions are presented in.
    #[serde(default)]
    pub question_order: QuestionOrder,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            passing_score: default_passing_score(),
            max_attempts: default_max_attempts(),
            time_limit_minutes: 0,
            question_order: QuestionOrder::Sequential,
        }
    }
}

pub(crate) fn default_passing_score() -> u32 {
    70
}

pub(crate) fn default_max_attempts() -> u32 {
    3
}

/// Question presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrder {
    #[default]
    Sequential,
    Random,
}

impl fmt::Display for QuestionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionOrder::Sequential => write!(f, "sequential"),
            QuestionOrder::Random => write!(f, "random"),
        }
    }
}

impl FromStr for QuestionOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(QuestionOrder::Sequential),
            "random" | "shuffled" => Ok(QuestionOrder::Random),
            other => Err(format!("unknown question order: {other}")),
        }
    }
}

/// A complete quiz definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Description shown to learners.
    #[serde(default)]
    pub description: String,
    /// Grading and delivery settings.
    #[serde(default)]
    pub settings: QuizSettings,
    /// The questions, in whichever representation this quiz uses.
    pub source: QuizSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_order_display_and_parse() {
        assert_eq!(QuestionOrder::Sequential.to_string(), "sequential");
        assert_eq!(QuestionOrder::Random.to_string(), "random");
        assert_eq!(
            "sequential".parse::<QuestionOrder>().unwrap(),
            QuestionOrder::Sequential
        );
        assert_eq!(
            "Shuffled".parse::<QuestionOrder>().unwrap(),
            QuestionOrder::Random
        );
        assert!("reverse".parse::<QuestionOrder>().is_err());
    }

    #[test]
    fn settings_default() {
        let settings = QuizSettings::default();
        assert_eq!(settings.passing_score, 70);
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.time_limit_minutes, 0);
        assert_eq!(settings.question_order, QuestionOrder::Sequential);
    }

    #[test]
    fn correct_letter_from_position() {
        let question = QuestionDefinition {
            text: "1. Pick one".into(),
            options: vec!["foo".into(), "bar".into(), "baz".into()],
            correct_option: "baz".into(),
        };
        assert_eq!(question.correct_letter(), Some('C'));

        let unresolved = QuestionDefinition {
            text: "2. No options".into(),
            options: vec![],
            correct_option: String::new(),
        };
        assert_eq!(unresolved.correct_letter(), None);
    }

    #[test]
    fn quiz_serde_roundtrip() {
        let quiz = Quiz {
            id: "networking-basics".into(),
            title: "Networking Basics".into(),
            description: "Intro networking quiz".into(),
            settings: QuizSettings::default(),
            source: QuizSource::Table(vec![StoredQuestion {
                id: "q1".into(),
                text: "What does TCP stand for?".into(),
                options: vec![
                    "Transmission Control Protocol".into(),
                    "Transfer Connection Protocol".into(),
                ],
                correct_answer: "Transmission Control Protocol".into(),
            }]),
        };
        let json = serde_json::to_string(&quiz).unwrap();
        let deserialized: Quiz = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, quiz);
        assert_eq!(deserialized.source.question_count(), 1);
    }
}
