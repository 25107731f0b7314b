//! quizmark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Quiz parsing, grading, and progress tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz definition files
    Validate {
        /// Path to a quiz file (.toml or .txt) or a directory of .toml quizzes
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Show the parsed questions of a quiz
    Show {
        /// Path to a quiz file (.toml or .txt)
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Grade an answers file against a quiz
    Score {
        /// Path to a quiz file (.toml or .txt)
        #[arg(long)]
        quiz: PathBuf,

        /// Path to a JSON answers file (question key -> submitted answer)
        #[arg(long)]
        answers: PathBuf,

        /// Override the quiz's passing score
        #[arg(long)]
        passing_score: Option<u32>,

        /// Write the submission report JSON here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit code 1 if the attempt did not pass
        #[arg(long)]
        fail_on_fail: bool,
    },

    /// Create starter quiz files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Show { quiz } => commands::show::execute(quiz),
        Commands::Score {
            quiz,
            answers,
            passing_score,
            output,
            fail_on_fail,
        } => commands::score::execute(quiz, answers, passing_score, output, fail_on_fail),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
