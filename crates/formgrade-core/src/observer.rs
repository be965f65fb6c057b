//! Observation hooks for the scoring engine.
//!
//! The engine never logs on its own. Callers that want diagnostics pass an
//! observer; [`TracingObserver`] turns the callbacks into `tracing` events.

use crate::model::Question;
use crate::results::{ItemScore, Outcome, QuestionScore, ScoreResult, SkipReason};

/// Callbacks fired at scoring boundaries.
pub trait ScoreObserver: Send + Sync {
    fn on_question(&self, index: usize, question: &Question, answered: bool);
    fn on_item(&self, question: &Question, item: &ItemScore);
    fn on_question_scored(&self, score: &QuestionScore);
    fn on_skipped(&self, question: &Question, reason: SkipReason);
    fn on_complete(&self, result: &ScoreResult);
}

/// No-op observer.
pub struct NoopObserver;

impl ScoreObserver for NoopObserver {
    fn on_question(&self, _: usize, _: &Question, _: bool) {}
    fn on_item(&self, _: &Question, _: &ItemScore) {}
    fn on_question_scored(&self, _: &QuestionScore) {}
    fn on_skipped(&self, _: &Question, _: SkipReason) {}
    fn on_complete(&self, _: &ScoreResult) {}
}

/// Emits structured `tracing` events, per item at debug level.
pub struct TracingObserver;

impl ScoreObserver for TracingObserver {
    fn on_question(&self, index: usize, question: &Question, answered: bool) {
        tracing::debug!(
            question = index + 1,
            id = %question.id,
            kind = %question.kind,
            answered,
            "scoring question"
        );
    }

    fn on_item(&self, question: &Question, item: &ItemScore) {
        let outcome = match item.outcome {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Unanswered => "unanswered",
            Outcome::NoKey => "no key",
        };
        tracing::debug!(
            id = %question.id,
            slot = item.index,
            points = item.points,
            outcome,
            "scored slot"
        );
    }

    fn on_question_scored(&self, score: &QuestionScore) {
        tracing::debug!(
            id = %score.question_id,
            score = score.score,
            max_score = score.max_score,
            "question total"
        );
    }

    fn on_skipped(&self, question: &Question, reason: SkipReason) {
        tracing::debug!(id = %question.id, kind = %question.kind, ?reason, "question skipped");
    }

    fn on_complete(&self, result: &ScoreResult) {
        tracing::info!(
            score = result.score,
            max_score = result.max_score,
            percentage = result.percentage(),
            "final score"
        );
    }
}
