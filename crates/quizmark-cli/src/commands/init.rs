//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("quizzes")?;

    let toml_path = std::path::Path::new("quizzes/example.toml");
    if toml_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(toml_path, SAMPLE_TABLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    let text_path = std::path::Path::new("quizzes/example.txt");
    if text_path.exists() {
        println!("quizzes/example.txt already exists, skipping.");
    } else {
        std::fs::write(text_path, SAMPLE_TEXT_QUIZ)?;
        println!("Created quizzes/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit the quiz files under quizzes/");
    println!("  2. Run: quizmark validate --quiz quizzes/example.toml");
    println!("  3. Run: quizmark score --quiz quizzes/example.toml --answers answers.json");

    Ok(())
}

const SAMPLE_TABLE_QUIZ: &str = r#"# A table-defined quiz: answers are keyed by question id and must match
# correct_answer exactly.

[quiz]
id = "example"
title = "Example Quiz"
description = "A starter quiz to copy from"
passing_score = 70
max_attempts = 3

[[questions]]
id = "q1"
text = "Which HTTP method is idempotent?"
options = ["POST", "PUT", "PATCH"]
correct_answer = "PUT"

[[questions]]
id = "q2"
text = "What does DNS resolve?"
options = ["Names to addresses", "Addresses to routes", "Ports to services"]
correct_answer = "Names to addresses"
"#;

const SAMPLE_TEXT_QUIZ: &str = r#"1. Which HTTP method is idempotent?
A) POST
B) PUT
C) PATCH
Correct Answer: B

2. What does DNS resolve?
A) Names to addresses*
B) Addresses to routes
C) Ports to services
"#;
