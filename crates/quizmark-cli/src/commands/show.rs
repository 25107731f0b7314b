//! The `quizmark show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmark_core::model::QuizSource;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quiz = quizmark_core::parser::load_quiz(&quiz_path)?;

    println!("{} — {}", quiz.id, quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!(
        "passing score {}%, max attempts {}, {} questions",
        quiz.settings.passing_score,
        quiz.settings.max_attempts,
        quiz.source.question_count()
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Correct"]);

    match &quiz.source {
        QuizSource::Text(questions) => {
            for (idx, question) in questions.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(idx + 1),
                    Cell::new(&question.text),
                    Cell::new(question.options.join("\n")),
                    Cell::new(&question.correct_option),
                ]);
            }
        }
        QuizSource::Table(questions) => {
            for question in questions {
                table.add_row(vec![
                    Cell::new(&question.id),
                    Cell::new(&question.text),
                    Cell::new(question.options.join("\n")),
                    Cell::new(&question.correct_answer),
                ]);
            }
        }
    }

    println!("{table}");

    Ok(())
}
