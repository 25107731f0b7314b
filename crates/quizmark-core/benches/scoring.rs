use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmark_core::model::{AnswerMap, QuestionDefinition, StoredQuestion};
use quizmark_core::scoring::{score_parsed, score_stored};

fn parsed_questions(n: usize) -> Vec<QuestionDefinition> {
    (0..n)
        .map(|i| QuestionDefinition {
            text: format!("{}. Question {}", i + 1, i + 1),
            options: vec!["A".into(), "B".into(), "C".into()],
            correct_option: "B".into(),
        })
        .collect()
}

fn stored_questions(n: usize) -> Vec<StoredQuestion> {
    (0..n)
        .map(|i| StoredQuestion {
            id: format!("q{i}"),
            text: format!("Question {i}"),
            options: vec!["first".into(), "second".into(), "third".into()],
            correct_answer: "second".into(),
        })
        .collect()
}

fn position_answers(n: usize) -> AnswerMap {
    (0..n).map(|i| ((i + 1).to_string(), "b".to_string())).collect()
}

fn id_answers(n: usize) -> AnswerMap {
    (0..n)
        .map(|i| (format!("q{i}"), "second".to_string()))
        .collect()
}

fn bench_score_parsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_parsed");

    for n in [10usize, 100, 1000] {
        let questions = parsed_questions(n);
        let answers = position_answers(n);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| score_parsed(black_box(&questions), black_box(&answers), black_box(70)))
        });
    }

    let questions = parsed_questions(100);
    let empty = AnswerMap::new();
    group.bench_function("100_questions_unanswered", |b| {
        b.iter(|| score_parsed(black_box(&questions), black_box(&empty), black_box(70)))
    });

    group.finish();
}

fn bench_score_stored(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_stored");

    for n in [10usize, 100, 1000] {
        let questions = stored_questions(n);
        let answers = id_answers(n);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| score_stored(black_box(&questions), black_box(&answers), black_box(70)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_parsed, bench_score_stored);
criterion_main!(benches);
