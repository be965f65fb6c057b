//! JSON form loader and validator.
//!
//! Loads form definitions from JSON files and directories, and checks them
//! for configuration mistakes that would make scoring surprising.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Form, Question, QuestionKind};
use crate::settings::QuestionSettings;

/// Parse a single JSON file into a `Form`.
pub fn parse_form(path: &Path) -> Result<Form> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;

    parse_form_str(&content, path)
}

/// Parse a JSON string into a `Form` (useful for testing).
pub fn parse_form_str(content: &str, source_path: &Path) -> Result<Form> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse form JSON: {}", source_path.display()))
}

/// Recursively load all `.json` form files from a directory.
pub fn load_form_directory(dir: &Path) -> Result<Vec<Form>> {
    let mut forms = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            forms.extend(load_form_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_form(&path) {
                Ok(form) => forms.push(form),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(forms)
}

/// A warning from form validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate a form for common scoring configuration issues.
pub fn validate_form(form: &Form) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if form.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "form has no questions".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for question in &form.questions {
        if question.id.trim().is_empty() {
            warnings.push(ValidationWarning::question(question, "question id is empty"));
        } else if !seen_ids.insert(question.id.as_str()) {
            warnings.push(ValidationWarning::question(
                question,
                format!(
                    "duplicate question ID: {} (answers only ever score the first)",
                    question.id
                ),
            ));
        }
    }

    for question in &form.questions {
        if let QuestionKind::Unsupported(kind) = &question.kind {
            warnings.push(ValidationWarning::question(
                question,
                format!("unsupported question type '{kind}' will not be scored"),
            ));
            continue;
        }

        match question.settings() {
            None => warnings.push(ValidationWarning::question(
                question,
                format!("{} settings are missing or malformed", question.kind),
            )),
            Some(settings) => check_settings(question, &settings, &mut warnings),
        }
    }

    warnings
}

fn check_settings(question: &Question, settings: &QuestionSettings, warnings: &mut Vec<ValidationWarning>) {
    match settings {
        QuestionSettings::Categorize(s) => {
            let Some(correct) = &s.correct_answers else {
                warnings.push(ValidationWarning::question(
                    question,
                    "categorize question has no correctAnswers and will not be scored",
                ));
                return;
            };
            for (index, item) in s.items.iter().enumerate() {
                match correct.get(index) {
                    None => warnings.push(ValidationWarning::question(
                        question,
                        format!("item '{item}' has no correct category"),
                    )),
                    Some(&category) if category >= s.categories.len() => {
                        warnings.push(ValidationWarning::question(
                            question,
                            format!("item '{item}' points at missing category {category}"),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        QuestionSettings::Cloze(s) => {
            let Some(correct) = &s.correct_answers else {
                warnings.push(ValidationWarning::question(
                    question,
                    "cloze question has no correctAnswers and will not be scored",
                ));
                return;
            };
            for index in 0..s.blanks.len() {
                if !correct.get(index).is_some_and(|c| !c.trim().is_empty()) {
                    warnings.push(ValidationWarning::question(
                        question,
                        format!("blank {} has no correct answer", index + 1),
                    ));
                }
            }
        }
        QuestionSettings::Comprehension(s) => {
            let Some(subs) = &s.questions else {
                warnings.push(ValidationWarning::question(
                    question,
                    "comprehension question has no sub-questions and will not be scored",
                ));
                return;
            };
            for (index, sub) in subs.iter().enumerate() {
                match sub.correct_answer {
                    None => warnings.push(ValidationWarning::question(
                        question,
                        format!("sub-question {} has no correct answer", index + 1),
                    )),
                    Some(answer) if answer < 0 || answer as usize >= sub.options.len() => {
                        warnings.push(ValidationWarning::question(
                            question,
                            format!(
                                "sub-question {} correct answer {answer} is out of range ({} options)",
                                index + 1,
                                sub.options.len()
                            ),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }
}
