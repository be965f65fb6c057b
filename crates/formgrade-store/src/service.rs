//! Response submission and scoring preview.
//!
//! Loads the form, runs the scoring engine, and persists the result. Scoring
//! failures never block a submission: a form that can't be loaded scores
//! `{0, 0}` and the response is still stored.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use formgrade_core::answer::sanitize_answers;
use formgrade_core::engine::score_questions;
use formgrade_core::model::Response;
use formgrade_core::observer::{NoopObserver, ScoreObserver};
use formgrade_core::results::{ScoreBreakdown, ScoreResult};

use crate::error::StoreResult;
use crate::store::FormStore;

/// A respondent's submission as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub form_id: String,
    /// Raw answers; sanitized before scoring and storage.
    #[serde(default)]
    pub answers: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Submission {
    pub fn anonymous(form_id: impl Into<String>, answers: Value) -> Self {
        Self {
            form_id: form_id.into(),
            answers,
            user_id: None,
            ip_address: None,
            user_agent: None,
        }
    }
}

/// Result of a scoring preview; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScoring {
    pub message: String,
    pub result: ScoreResult,
    pub form_id: String,
    pub answers: Value,
}

/// Scores and records submissions against a store.
pub struct SubmissionService {
    store: Arc<dyn FormStore>,
    observer: Arc<dyn ScoreObserver>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self {
            store,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach an observer that receives scoring events.
    pub fn with_observer(mut self, observer: Arc<dyn ScoreObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn store(&self) -> &Arc<dyn FormStore> {
        &self.store
    }

    /// Score raw answers against the stored form, with per-question detail.
    ///
    /// A missing or unreadable form yields an empty breakdown.
    pub async fn score(&self, form_id: &str, answers: &Value) -> ScoreBreakdown {
        let form = match self.store.get_form(form_id).await {
            Ok(Some(form)) => form,
            Ok(None) => {
                tracing::warn!("form {form_id} not found, scoring as 0/0");
                self.observer.on_complete(&ScoreResult::default());
                return ScoreBreakdown::default();
            }
            Err(e) => {
                tracing::warn!("failed to load form {form_id}, scoring as 0/0: {e}");
                self.observer.on_complete(&ScoreResult::default());
                return ScoreBreakdown::default();
            }
        };
        let answers = sanitize_answers(answers);
        tracing::debug!(
            form = %form_id,
            questions = form.questions.len(),
            answers = answers.len(),
            "calculating score"
        );
        score_questions(&form.questions, &answers, self.observer.as_ref())
    }

    /// Score a submission and store it as a new response.
    pub async fn submit(&self, submission: Submission) -> StoreResult<Response> {
        let result = self
            .score(&submission.form_id, &submission.answers)
            .await
            .total();

        let response = Response {
            id: Uuid::new_v4(),
            form_id: submission.form_id,
            user_id: submission.user_id,
            answers: sanitize_answers(&submission.answers),
            score: result.score,
            max_score: result.max_score,
            submitted_at: Utc::now(),
            ip_address: submission.ip_address,
            user_agent: submission.user_agent,
        };
        self.store.save_response(&response).await?;

        tracing::info!(
            response = %response.id,
            form = %response.form_id,
            user = response.respondent(),
            score = response.score,
            max_score = response.max_score,
            "response saved"
        );
        Ok(response)
    }

    /// Score answers without persisting anything.
    pub async fn test_scoring(&self, form_id: &str, answers: Value) -> TestScoring {
        let result = self.score(form_id, &answers).await.total();
        TestScoring {
            message: "Scoring test completed".to_string(),
            result,
            form_id: form_id.to_string(),
            answers,
        }
    }
}
