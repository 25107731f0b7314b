//! The `quizmark score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizmark_core::model::AnswerMap;
use quizmark_core::report::SubmissionReport;
use quizmark_core::scoring;

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    passing_score: Option<u32>,
    output: Option<PathBuf>,
    fail_on_fail: bool,
) -> Result<()> {
    let quiz = quizmark_core::parser::load_quiz(&quiz_path)?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers file: {}", answers_path.display()))?;
    let answers: AnswerMap = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", answers_path.display()))?;

    let passing_score = passing_score.unwrap_or(quiz.settings.passing_score);
    let result = scoring::score(&quiz.source, &answers, passing_score);
    let report = SubmissionReport::from_result(&result, passing_score);

    println!("{}", report.message);

    let mut table = Table::new();
    table.set_header(vec!["Question", "Submitted", "Correct answer", "Result"]);
    for outcome in &report.questions {
        table.add_row(vec![
            Cell::new(&outcome.question),
            Cell::new(&outcome.submitted_answer),
            Cell::new(&outcome.correct_answer),
            Cell::new(if outcome.is_correct { "OK" } else { "MISS" }),
        ]);
    }
    println!("{table}");

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Report written to {}", path.display());
    }

    if fail_on_fail && !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
