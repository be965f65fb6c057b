//! Core data model types for formgrade.
//!
//! Forms, their questions, and the response records produced when a
//! respondent submits answers. JSON field names follow the camelCase shape
//! the form editor sends and stores.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::answer::Answer;
use crate::results::ScoreResult;
use crate::settings::QuestionSettings;

/// The interactive question types.
///
/// Anything other than the three supported names is kept verbatim as
/// `Unsupported` so forms with newer question types still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    Categorize,
    Cloze,
    Comprehension,
    Unsupported(String),
}

impl QuestionKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionKind::Categorize => "categorize",
            QuestionKind::Cloze => "cloze",
            QuestionKind::Comprehension => "comprehension",
            QuestionKind::Unsupported(other) => other,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, QuestionKind::Unsupported(_))
    }
}

impl From<String> for QuestionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "categorize" => QuestionKind::Categorize,
            "cloze" => QuestionKind::Cloze,
            "comprehension" => QuestionKind::Comprehension,
            _ => QuestionKind::Unsupported(s),
        }
    }
}

impl From<&str> for QuestionKind {
    fn from(s: &str) -> Self {
        QuestionKind::from(s.to_string())
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Unsupported(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question within a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier answers refer to; unique within the form.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Enforced by the submission front end, not by scoring.
    #[serde(default)]
    pub required: bool,
    /// Type-dependent settings, see [`QuestionSettings`].
    #[serde(default)]
    pub settings: Value,
}

impl Question {
    /// Settings resolved for this question's own kind.
    pub fn settings(&self) -> Option<QuestionSettings> {
        QuestionSettings::parse(&self.kind, &self.settings)
    }
}

/// A form: an ordered collection of questions plus publishing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub is_published: bool,
    /// Public identifier used in shareable links.
    #[serde(default = "new_share_id")]
    pub share_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn new_share_id() -> String {
    Uuid::new_v4().to_string()
}

impl Form {
    /// Create an unpublished form with a fresh share identifier.
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            header_image: None,
            questions,
            is_published: false,
            share_id: new_share_id(),
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One respondent's stored submission against a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: Uuid,
    pub form_id: String,
    /// Absent for anonymous submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub max_score: u64,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Response {
    pub fn result(&self) -> ScoreResult {
        ScoreResult::new(self.score, self.max_score)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Rounded percentage, 0 when the form had nothing to score.
    pub fn score_percentage(&self) -> u32 {
        self.result().percentage()
    }

    /// Display name for listings.
    pub fn respondent(&self) -> &str {
        self.user_id.as_deref().unwrap_or("Anonymous")
    }
}
