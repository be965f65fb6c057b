//! Aggregate statistics over a form's responses.

use serde::{Deserialize, Serialize};

use crate::model::Response;

/// Summary of all responses collected for one form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub count: usize,
    /// Responses submitted by a signed-in user.
    pub authenticated: usize,
    pub anonymous: usize,
    /// Mean of the per-response rounded percentages.
    pub mean_percentage: f64,
    pub best_percentage: u32,
    pub worst_percentage: u32,
    /// Responses that earned every available point.
    pub perfect_scores: usize,
}

/// Summarize responses. An empty slice yields all zeros.
pub fn summarize_responses(responses: &[Response]) -> ResponseSummary {
    if responses.is_empty() {
        return ResponseSummary::default();
    }

    let percentages: Vec<u32> = responses.iter().map(Response::score_percentage).collect();
    let authenticated = responses.iter().filter(|r| r.is_authenticated()).count();

    ResponseSummary {
        count: responses.len(),
        authenticated,
        anonymous: responses.len() - authenticated,
        mean_percentage: percentages.iter().map(|&p| f64::from(p)).sum::<f64>()
            / percentages.len() as f64,
        best_percentage: percentages.iter().copied().max().unwrap_or(0),
        worst_percentage: percentages.iter().copied().min().unwrap_or(0),
        perfect_scores: responses.iter().filter(|r| r.result().is_perfect()).count(),
    }
}
