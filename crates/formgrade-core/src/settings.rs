//! Typed per-question-type settings.
//!
//! A question stores its settings as free-form JSON. The scorer reads them
//! through [`QuestionSettings::parse`], which picks the structure for the
//! question's own kind and returns `None` when the settings don't have that
//! shape at all.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::indexed::{integer, IndexedValue, IndexedValues};
use crate::model::QuestionKind;

/// Points a slot is worth when no positive value is configured.
pub const DEFAULT_POINTS: u32 = 1;

/// Settings for a categorize question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeSettings {
    /// Category names, addressed by index.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Draggable item labels, addressed by index.
    #[serde(default)]
    pub items: Vec<String>,
    /// Item index to correct category index. Absent means not scorable.
    #[serde(default, deserialize_with = "answer_key")]
    pub correct_answers: Option<IndexedValues<usize>>,
    /// Item index to points.
    #[serde(default)]
    pub item_scores: IndexedValues<u32>,
}

impl CategorizeSettings {
    pub fn points(&self, item_index: usize) -> u32 {
        positive_or_default(self.item_scores.get(item_index))
    }
}

/// Settings for a cloze (fill-in-the-blank) question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// One entry per blank slot.
    #[serde(default)]
    pub blanks: Vec<String>,
    /// Blank index to canonical answer. Absent means not scorable.
    #[serde(default, deserialize_with = "answer_key")]
    pub correct_answers: Option<IndexedValues<String>>,
    /// Blank index to points.
    #[serde(default)]
    pub blank_scores: IndexedValues<u32>,
}

impl ClozeSettings {
    pub fn points(&self, blank_index: usize) -> u32 {
        positive_or_default(self.blank_scores.get(blank_index))
    }
}

/// Settings for a reading-comprehension question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    /// Multiple-choice sub-questions. Absent means not scorable.
    #[serde(default, deserialize_with = "lenient_sub_questions")]
    pub questions: Option<Vec<SubQuestion>>,
}

/// One multiple-choice sub-question of a comprehension question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index of the correct option.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub correct_answer: Option<i64>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub score: Option<u32>,
}

impl SubQuestion {
    pub fn points(&self) -> u32 {
        positive_or_default(self.score.as_ref())
    }

    /// Lenient read of a single array element; malformed elements still
    /// occupy a slot with default values.
    fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self {
            question: map
                .get("question")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            options: map
                .get("options")
                .and_then(Value::as_array)
                .map(|opts| {
                    opts.iter()
                        .filter_map(|o| o.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            correct_answer: map.get("correctAnswer").and_then(integer),
            score: map.get("score").and_then(positive_points),
        }
    }
}

/// Settings resolved against the question's kind.
#[derive(Debug, Clone)]
pub enum QuestionSettings {
    Categorize(CategorizeSettings),
    Cloze(ClozeSettings),
    Comprehension(ComprehensionSettings),
}

impl QuestionSettings {
    /// Resolve raw settings for `kind`. Returns `None` for unsupported kinds
    /// and for settings that don't match the kind's structure.
    pub fn parse(kind: &QuestionKind, raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        let parsed = match kind {
            QuestionKind::Categorize => {
                serde_json::from_value(raw.clone()).map(QuestionSettings::Categorize)
            }
            QuestionKind::Cloze => serde_json::from_value(raw.clone()).map(QuestionSettings::Cloze),
            QuestionKind::Comprehension => {
                serde_json::from_value(raw.clone()).map(QuestionSettings::Comprehension)
            }
            QuestionKind::Unsupported(_) => return None,
        };
        match parsed {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::debug!("unusable {kind} settings: {e}");
                None
            }
        }
    }

    /// Whether the sub-structure the scorer needs is present.
    pub fn is_scorable(&self) -> bool {
        match self {
            QuestionSettings::Categorize(s) => s.correct_answers.is_some(),
            QuestionSettings::Cloze(s) => s.correct_answers.is_some(),
            QuestionSettings::Comprehension(s) => s.questions.is_some(),
        }
    }
}

fn positive_or_default(points: Option<&u32>) -> u32 {
    match points {
        Some(&p) if p > 0 => p,
        _ => DEFAULT_POINTS,
    }
}

fn positive_points(value: &Value) -> Option<u32> {
    integer(value)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(integer(&raw))
}

fn lenient_points<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(positive_points(&raw))
}

/// Only an object or array counts as a configured answer key; scalars such
/// as `""`, `0` or `false` mean none was set.
fn answer_key<'de, D, T>(deserializer: D) -> Result<Option<IndexedValues<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: IndexedValue,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Object(_) | Value::Array(_) => Some(IndexedValues::from_json(&raw)),
        _ => None,
    })
}

fn lenient_sub_questions<'de, D>(deserializer: D) -> Result<Option<Vec<SubQuestion>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_array()
        .map(|items| items.iter().map(SubQuestion::from_json).collect()))
}
