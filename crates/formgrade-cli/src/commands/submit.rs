//! The `formgrade submit` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use formgrade_core::observer::TracingObserver;
use formgrade_store::config::load_config_from;
use formgrade_store::{Submission, SubmissionService};

pub async fn execute(
    form_id: String,
    answers_path: PathBuf,
    user: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let answers = super::read_answers(&answers_path)?;
    if config.log_answers {
        tracing::debug!(form = %form_id, answers = %answers, "submitted answers");
    }

    let service = SubmissionService::new(Arc::new(config.open_store()))
        .with_observer(Arc::new(TracingObserver));

    let mut submission = Submission::anonymous(form_id, answers);
    submission.user_id = user;
    let response = service
        .submit(submission)
        .await
        .context("failed to store response")?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&response)?),
        "text" => {
            println!("Response {} saved", response.id);
            println!(
                "Score: {}/{} ({}%)",
                response.score,
                response.max_score,
                response.score_percentage()
            );
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
