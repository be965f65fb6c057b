//! Scoring result types.

use serde::{Deserialize, Serialize};

use crate::model::QuestionKind;

/// Total points earned against total points available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u64,
    pub max_score: u64,
}

impl ScoreResult {
    pub fn new(score: u64, max_score: u64) -> Self {
        Self { score, max_score }
    }

    /// Rounded percentage, or 0 when nothing was scorable.
    pub fn percentage(&self) -> u32 {
        if self.max_score == 0 {
            return 0;
        }
        ((self.score as f64 / self.max_score as f64) * 100.0).round() as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.max_score > 0 && self.score == self.max_score
    }
}

impl std::ops::AddAssign for ScoreResult {
    fn add_assign(&mut self, rhs: Self) {
        self.score += rhs.score;
        self.max_score += rhs.max_score;
    }
}

/// How a single scorable slot (item, blank, sub-question) was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The respondent gave nothing usable for this slot.
    Unanswered,
    /// The form has no correct answer configured for this slot.
    NoKey,
}

/// One slot's contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemScore {
    /// Position of the item, blank, or sub-question.
    pub index: usize,
    pub points: u32,
    pub outcome: Outcome,
}

impl ItemScore {
    pub fn earned(&self) -> u32 {
        if self.outcome == Outcome::Correct {
            self.points
        } else {
            0
        }
    }
}

/// Per-question scoring detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: String,
    pub kind: QuestionKind,
    pub score: u64,
    pub max_score: u64,
    /// Whether any answer entry matched this question.
    pub answered: bool,
    pub items: Vec<ItemScore>,
}

impl QuestionScore {
    pub fn result(&self) -> ScoreResult {
        ScoreResult::new(self.score, self.max_score)
    }
}

/// Why a question contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedType,
    MissingSettings,
}

/// A question that was skipped entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedQuestion {
    pub question_id: String,
    pub kind: QuestionKind,
    pub reason: SkipReason,
}

/// Full per-question breakdown of a scored submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub questions: Vec<QuestionScore>,
    pub skipped: Vec<SkippedQuestion>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> ScoreResult {
        let mut total = ScoreResult::default();
        for q in &self.questions {
            total += q.result();
        }
        total
    }
}
