//! The scoring engine.
//!
//! Pure computation over a form and a respondent's answers. Nothing here
//! performs I/O, holds state between calls, or fails: malformed input
//! degrades to fewer points, never to an error.

use serde_json::Value;

use crate::answer::{
    find_answer, sanitize_answers, Answer, AnswerPayload, CategorizeAnswer, ClozeAnswer,
    ComprehensionAnswer,
};
use crate::model::{Form, Question};
use crate::observer::{NoopObserver, ScoreObserver};
use crate::results::{
    ItemScore, Outcome, QuestionScore, ScoreBreakdown, ScoreResult, SkipReason, SkippedQuestion,
};
use crate::settings::{CategorizeSettings, ClozeSettings, ComprehensionSettings, QuestionSettings};

/// Score raw submitted answers against a form.
///
/// An absent form scores `{0, 0}`. Answers that are not a JSON array are
/// treated as no answers at all.
pub fn compute_score(form: Option<&Form>, answers: &Value) -> ScoreResult {
    compute_score_with(form, answers, &NoopObserver)
}

/// [`compute_score`] with an observer attached.
pub fn compute_score_with(
    form: Option<&Form>,
    answers: &Value,
    observer: &dyn ScoreObserver,
) -> ScoreResult {
    let Some(form) = form else {
        let result = ScoreResult::default();
        observer.on_complete(&result);
        return result;
    };
    let answers = sanitize_answers(answers);
    score_questions(&form.questions, &answers, observer).total()
}

/// Score already-sanitized answers question by question.
pub fn score_questions(
    questions: &[Question],
    answers: &[Answer],
    observer: &dyn ScoreObserver,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    for (index, question) in questions.iter().enumerate() {
        let answer = find_answer(answers, &question.id);
        observer.on_question(index, question, answer.is_some());

        let settings = match question.settings() {
            Some(s) if s.is_scorable() => s,
            Some(_) | None => {
                let reason = if question.kind.is_supported() {
                    SkipReason::MissingSettings
                } else {
                    SkipReason::UnsupportedType
                };
                observer.on_skipped(question, reason);
                breakdown.skipped.push(SkippedQuestion {
                    question_id: question.id.clone(),
                    kind: question.kind.clone(),
                    reason,
                });
                continue;
            }
        };

        // Dispatch follows the question's kind; the answer's claimed type is ignored.
        let payload = answer.and_then(|a| a.payload(&question.kind));
        let items = match (&settings, payload) {
            (QuestionSettings::Categorize(s), Some(AnswerPayload::Categorize(a))) => {
                score_categorize(s, Some(&a))
            }
            (QuestionSettings::Categorize(s), _) => score_categorize(s, None),
            (QuestionSettings::Cloze(s), Some(AnswerPayload::Cloze(a))) => score_cloze(s, Some(&a)),
            (QuestionSettings::Cloze(s), _) => score_cloze(s, None),
            (QuestionSettings::Comprehension(s), Some(AnswerPayload::Comprehension(a))) => {
                score_comprehension(s, Some(&a))
            }
            (QuestionSettings::Comprehension(s), _) => score_comprehension(s, None),
        };

        for item in &items {
            observer.on_item(question, item);
        }

        let question_score = QuestionScore {
            question_id: question.id.clone(),
            kind: question.kind.clone(),
            score: items.iter().map(|i| u64::from(i.earned())).sum(),
            max_score: items.iter().map(|i| u64::from(i.points)).sum(),
            answered: answer.is_some(),
            items,
        };
        observer.on_question_scored(&question_score);
        breakdown.questions.push(question_score);
    }

    observer.on_complete(&breakdown.total());
    breakdown
}

/// Every item counts toward the maximum; an item scores when the category
/// it was dropped into has the configured index.
fn score_categorize(settings: &CategorizeSettings, answer: Option<&CategorizeAnswer>) -> Vec<ItemScore> {
    let placed = answer
        .map(|a| a.category_indices(&settings.items, &settings.categories))
        .unwrap_or_default();
    let correct = settings.correct_answers.as_ref();

    (0..settings.items.len())
        .map(|index| {
            let expected = correct.and_then(|c| c.get(index));
            let outcome = judge(placed.get(index), expected, |given, key| given == key);
            ItemScore {
                index,
                points: settings.points(index),
                outcome,
            }
        })
        .collect()
}

/// Blanks compare trimmed and case-insensitively.
fn score_cloze(settings: &ClozeSettings, answer: Option<&ClozeAnswer>) -> Vec<ItemScore> {
    let correct = settings.correct_answers.as_ref();

    (0..settings.blanks.len())
        .map(|index| {
            let given = answer.and_then(|a| a.get(index));
            let expected = correct
                .and_then(|c| c.get(index))
                .map(String::as_str)
                .filter(|s| !s.is_empty());
            let outcome = judge(given, expected, |given, key| normalize(given) == normalize(key));
            ItemScore {
                index,
                points: settings.points(index),
                outcome,
            }
        })
        .collect()
}

/// Option indices compare exactly.
fn score_comprehension(
    settings: &ComprehensionSettings,
    answer: Option<&ComprehensionAnswer>,
) -> Vec<ItemScore> {
    let questions = settings.questions.as_deref().unwrap_or_default();

    questions
        .iter()
        .enumerate()
        .map(|(index, sub)| {
            let given = answer.and_then(|a| a.get(index));
            let outcome = judge(given, sub.correct_answer, |given, key| given == key);
            ItemScore {
                index,
                points: sub.points(),
                outcome,
            }
        })
        .collect()
}

fn judge<T>(given: Option<T>, expected: Option<T>, matches: impl Fn(&T, &T) -> bool) -> Outcome {
    match (given, expected) {
        (_, None) => Outcome::NoKey,
        (None, Some(_)) => Outcome::Unanswered,
        (Some(g), Some(e)) if matches(&g, &e) => Outcome::Correct,
        (Some(_), Some(_)) => Outcome::Incorrect,
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
