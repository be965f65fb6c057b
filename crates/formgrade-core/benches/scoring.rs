use criterion::{black_box, criterion_group, criterion_main, Criterion};

use formgrade_core::answer::sanitize_answers;
use formgrade_core::compute_score;
use formgrade_core::model::{Form, Question, QuestionKind};
use serde_json::{json, Value};

fn make_question(id: &str, kind: &str, settings: Value) -> Question {
    Question {
        id: id.into(),
        kind: QuestionKind::from(kind),
        title: id.into(),
        description: None,
        image: None,
        required: false,
        settings,
    }
}

fn make_form(copies: usize) -> Form {
    let mut questions = Vec::new();
    for i in 0..copies {
        questions.push(make_question(
            &format!("cat{i}"),
            "categorize",
            json!({
                "items": ["Dog", "Red", "Oak", "Sky"],
                "categories": ["Animals", "Colors", "Plants"],
                "correctAnswers": {"0": 0, "1": 1, "2": 2, "3": 1},
                "itemScores": {"0": 2}
            }),
        ));
        questions.push(make_question(
            &format!("cloze{i}"),
            "cloze",
            json!({
                "blanks": ["brown", "lazy"],
                "correctAnswers": {"0": "brown", "1": "lazy"},
                "blankScores": {"1": 2}
            }),
        ));
        questions.push(make_question(
            &format!("comp{i}"),
            "comprehension",
            json!({"questions": [
                {"options": ["a", "b", "c"], "correctAnswer": 2, "score": 5},
                {"options": ["a", "b"], "correctAnswer": 0}
            ]}),
        ));
    }
    Form::new("bench", "Bench", questions)
}

fn make_answers(copies: usize) -> Value {
    let mut answers = Vec::new();
    for i in 0..copies {
        answers.push(json!({
            "questionId": format!("cat{i}"),
            "questionType": "categorize",
            "answer": {"Animals": ["Dog"], "Colors": ["Red", "Sky"], "Plants": []}
        }));
        answers.push(json!({
            "questionId": format!("cloze{i}"),
            "questionType": "cloze",
            "answer": {"0": "Brown", "1": " LAZY "}
        }));
        answers.push(json!({
            "questionId": format!("comp{i}"),
            "questionType": "comprehension",
            "answer": {"0": 2, "1": 1}
        }));
    }
    Value::Array(answers)
}

fn bench_compute_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_score");

    for copies in [1, 10, 100] {
        let form = make_form(copies);
        let answers = make_answers(copies);
        group.bench_function(format!("questions={}", copies * 3), |b| {
            b.iter(|| compute_score(black_box(Some(&form)), black_box(&answers)))
        });
    }

    let form = make_form(10);
    group.bench_function("unanswered", |b| {
        b.iter(|| compute_score(black_box(Some(&form)), black_box(&Value::Null)))
    });

    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let answers = make_answers(100);
    c.bench_function("sanitize_answers/300", |b| {
        b.iter(|| sanitize_answers(black_box(&answers)))
    });
}

criterion_group!(benches, bench_compute_score, bench_sanitize);
criterion_main!(benches);
