//! Submitted answers: sanitization and typed payloads.
//!
//! Answers arrive from respondents as untrusted JSON. [`sanitize_answers`]
//! keeps only well-formed entries, and [`Answer::payload`] converts the raw
//! `answer` value into the variant dictated by the *question's* kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::indexed::IndexedValues;
use crate::model::QuestionKind;

/// One answer entry as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    /// The type the client claims; informational only.
    pub question_type: String,
    #[serde(default)]
    pub answer: Value,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, question_type: impl Into<String>, answer: Value) -> Self {
        Self {
            question_id: question_id.into(),
            question_type: question_type.into(),
            answer,
        }
    }

    /// Interpret the raw payload for a question of `kind`.
    pub fn payload(&self, kind: &QuestionKind) -> Option<AnswerPayload> {
        AnswerPayload::from_json(kind, &self.answer)
    }
}

/// Keep only answer entries that can be matched to a question.
///
/// Anything that isn't a JSON array yields no answers. Entries must be
/// objects with non-empty string `questionId` and `questionType` and an
/// `answer` key (a `null` payload is kept and reads as an empty answer).
pub fn sanitize_answers(raw: &Value) -> Vec<Answer> {
    let Some(entries) = raw.as_array() else {
        if !raw.is_null() {
            tracing::debug!("answers is not an array, treating as empty");
        }
        return Vec::new();
    };

    entries.iter().filter_map(sanitize_entry).collect()
}

fn sanitize_entry(entry: &Value) -> Option<Answer> {
    let obj = entry.as_object()?;
    let question_id = non_empty_str(obj.get("questionId"))?;
    let question_type = non_empty_str(obj.get("questionType"))?;
    let answer = obj.get("answer")?;
    Some(Answer {
        question_id: question_id.to_string(),
        question_type: question_type.to_string(),
        answer: answer.clone(),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// First answer for `question_id`; later duplicates are ignored.
pub fn find_answer<'a>(answers: &'a [Answer], question_id: &str) -> Option<&'a Answer> {
    answers.iter().find(|a| a.question_id == question_id)
}

/// A typed answer payload.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerPayload {
    Categorize(CategorizeAnswer),
    Cloze(ClozeAnswer),
    Comprehension(ComprehensionAnswer),
}

impl AnswerPayload {
    /// `None` for unsupported question kinds.
    pub fn from_json(kind: &QuestionKind, raw: &Value) -> Option<Self> {
        match kind {
            QuestionKind::Categorize => Some(AnswerPayload::Categorize(CategorizeAnswer::from_json(raw))),
            QuestionKind::Cloze => Some(AnswerPayload::Cloze(ClozeAnswer::from_json(raw))),
            QuestionKind::Comprehension => {
                Some(AnswerPayload::Comprehension(ComprehensionAnswer::from_json(raw)))
            }
            QuestionKind::Unsupported(_) => None,
        }
    }
}

/// Category name to the item labels dropped into it, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizeAnswer {
    pub placements: Vec<(String, Vec<String>)>,
}

impl CategorizeAnswer {
    pub fn from_json(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            return Self::default();
        };
        let placements = map
            .iter()
            .filter_map(|(category, items)| {
                let items = items.as_array()?;
                let labels = items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect();
                Some((category.clone(), labels))
            })
            .collect();
        Self { placements }
    }

    /// Resolve placements to item index -> category index using the
    /// question's own item and category lists. Labels or category names not
    /// found are ignored; the first matching position wins for duplicates,
    /// and a later category overrides an earlier one for the same item.
    pub fn category_indices(&self, items: &[String], categories: &[String]) -> IndexedValues<usize> {
        let mut resolved = std::collections::BTreeMap::new();
        for (category, labels) in &self.placements {
            let Some(category_index) = categories.iter().position(|c| c == category) else {
                continue;
            };
            for label in labels {
                if let Some(item_index) = items.iter().position(|i| i == label) {
                    resolved.insert(item_index, category_index);
                }
            }
        }
        resolved.into_iter().collect()
    }
}

/// Blank index to the submitted text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClozeAnswer {
    pub values: IndexedValues<String>,
}

impl ClozeAnswer {
    pub fn from_json(raw: &Value) -> Self {
        Self {
            values: IndexedValues::from_json(raw),
        }
    }

    /// The submitted text, if it is a non-empty string.
    pub fn get(&self, blank_index: usize) -> Option<&str> {
        self.values
            .get(blank_index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Sub-question index to the selected option index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComprehensionAnswer {
    pub selections: IndexedValues<i64>,
}

impl ComprehensionAnswer {
    pub fn from_json(raw: &Value) -> Self {
        Self {
            selections: IndexedValues::from_json(raw),
        }
    }

    pub fn get(&self, sub_question: usize) -> Option<i64> {
        self.selections.get(sub_question).copied()
    }
}
