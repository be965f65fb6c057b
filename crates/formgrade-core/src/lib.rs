//! formgrade-core: Form model, answer sanitization, and scoring engine.
//!
//! This crate defines the form and response data model and the pure scoring
//! function that the rest of formgrade builds on.

pub mod answer;
pub mod engine;
pub mod indexed;
pub mod model;
pub mod observer;
pub mod parser;
pub mod results;
pub mod settings;
pub mod statistics;

pub use engine::{compute_score, compute_score_with, score_questions};
pub use results::ScoreResult;
