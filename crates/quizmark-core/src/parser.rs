//! Quiz definition parsing.
//!
//! Handles both quiz representations: free-text definitions pasted into a
//! task's quiz field, and structured TOML quiz files, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    default_max_attempts, default_passing_score, QuestionDefinition, QuestionOrder, Quiz,
    QuizSettings, QuizSource, StoredQuestion,
};

/// Marker phrase that declares a question's correct answer.
const CORRECT_ANSWER_MARKER: &str = "Correct Answer:";

/// Parse a free-text quiz definition into structured questions.
///
/// The format is one numbered block per question:
///
/// ```text
/// 1. What does TCP stand for?
/// A) Transmission Control Protocol
/// B) Transfer Connection Protocol
/// Correct Answer: A
/// ```
///
/// The correct option can also be marked inline with a trailing `*` or a
/// `**` on its option line; when several lines qualify, the last one
/// scanned wins. Parsing is best-effort and never fails: unrecognized
/// lines end the current block, a block whose correct answer cannot be
/// resolved falls back to its first option, and input with no numbered
/// lines yields no questions.
pub fn parse_quiz_text(raw: &str) -> Vec<QuestionDefinition> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = trimmed.lines().map(str::trim).collect();
    let mut questions = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() || !is_question_header(line) {
            i += 1;
            continue;
        }

        let text = line.to_string();
        let mut options: Vec<String> = Vec::new();
        let mut correct: Option<String> = None;

        let mut j = i + 1;
        while j < lines.len() {
            let next = lines[j];
            if next.is_empty() {
                break;
            }

            if is_option_line(next) {
                let option_text = next.get(3..).unwrap_or("").trim().to_string();
                let marked = next.contains(CORRECT_ANSWER_MARKER)
                    || next.contains("**")
                    || next.ends_with('*');
                options.push(option_text.clone());
                if marked {
                    // Last marked option wins.
                    correct = Some(option_text);
                }
            } else if next.contains(CORRECT_ANSWER_MARKER) {
                if let Some(letter) = declared_correct_letter(next) {
                    let idx = (letter as u8 - b'A') as usize;
                    if idx < options.len() {
                        correct = Some(options[idx].clone());
                    }
                }
                // The declaration line ends the block whether or not a
                // letter could be extracted.
                break;
            } else {
                // Not part of this block; re-examined as the next header.
                break;
            }

            j += 1;
        }

        // Fall back to an option still carrying a `*` marker, then to the
        // first option. An empty marked option counts as unresolved.
        let mut correct = correct.filter(|c| !c.is_empty());
        if correct.is_none() {
            correct = options
                .iter()
                .find(|o| o.ends_with('*') || o.contains("**"))
                .cloned();
        }
        let correct = correct
            .filter(|c| !c.is_empty())
            .or_else(|| options.first().cloned())
            .unwrap_or_default();

        // Correctness markers are presentation noise; strip them from the
        // stored texts so the correct option matches an option verbatim.
        questions.push(QuestionDefinition {
            text,
            options: options.iter().map(|o| strip_markers(o)).collect(),
            correct_option: strip_markers(&correct),
        });

        i = j;
    }

    questions
}

/// A question header is a line starting with digits followed by a dot.
fn is_question_header(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with('.')
}

/// An option line starts with an uppercase letter and a closing paren.
fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(')')) if letter.is_ascii_uppercase()
    )
}

/// Extract the letter from a "Correct Answer: X" declaration line.
fn declared_correct_letter(line: &str) -> Option<char> {
    let start = line.find(CORRECT_ANSWER_MARKER)? + CORRECT_ANSWER_MARKER.len();
    line[start..]
        .trim_start()
        .chars()
        .next()
        .filter(char::is_ascii_uppercase)
}

fn strip_markers(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_passing_score")]
    passing_score: u32,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    #[serde(default)]
    time_limit_minutes: u32,
    #[serde(default = "default_question_order_str")]
    question_order: String,
    /// A free-text quiz definition; mutually exclusive with `[[questions]]`.
    #[serde(default)]
    raw_text: Option<String>,
}

fn default_question_order_str() -> String {
    "sequential".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz_file(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_file_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_file_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let question_order: QuestionOrder = parsed
        .quiz
        .question_order
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let source = match parsed.quiz.raw_text {
        Some(_) if !parsed.questions.is_empty() => anyhow::bail!(
            "{}: a quiz may define raw_text or [[questions]], not both",
            source_path.display()
        ),
        Some(text) => QuizSource::Text(parse_quiz_text(&text)),
        None => QuizSource::Table(
            parsed
                .questions
                .into_iter()
                .map(|q| StoredQuestion {
                    id: q.id,
                    text: q.text,
                    options: q.options,
                    correct_answer: q.correct_answer,
                })
                .collect(),
        ),
    };

    Ok(Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        settings: QuizSettings {
            passing_score: parsed.quiz.passing_score,
            max_attempts: parsed.quiz.max_attempts,
            time_limit_minutes: parsed.quiz.time_limit_minutes,
            question_order,
        },
        source,
    })
}

/// Load a free-text quiz definition file, using the file stem as its id.
pub fn parse_text_quiz_file(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("quiz")
        .to_string();

    Ok(Quiz {
        id: stem.clone(),
        title: stem,
        description: String::new(),
        settings: QuizSettings::default(),
        source: QuizSource::Text(parse_quiz_text(&content)),
    })
}

/// Load a quiz from a file, picking the format by extension: `.toml` for
/// structured quizzes, anything else is treated as a free-text definition.
pub fn load_quiz(path: &Path) -> Result<Quiz> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        parse_quiz_file(path)
    } else {
        parse_text_quiz_file(path)
    }
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_file(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id or 1-based position (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.settings.passing_score > 100 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "passing_score is {}, expected a percentage in 0-100",
                quiz.settings.passing_score
            ),
        });
    }

    if quiz.settings.max_attempts == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "max_attempts is 0; no learner can ever take this quiz".into(),
        });
    }

    if quiz.source.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    match &quiz.source {
        QuizSource::Text(questions) => {
            for (pos, question) in questions.iter().enumerate() {
                if question.options.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some((pos + 1).to_string()),
                        message: "question has no options".into(),
                    });
                }
            }
        }
        QuizSource::Table(questions) => {
            let mut seen_ids = HashSet::new();
            for question in questions {
                if !seen_ids.insert(&question.id) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: format!("duplicate question id: {}", question.id),
                    });
                }
                if question.options.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "question has no options".into(),
                    });
                } else if !question.options.contains(&question.correct_answer) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "correct_answer does not match any option".into(),
                    });
                }
            }
        }
    }

    warnings
}
